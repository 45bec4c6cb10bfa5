// Subscription access gate
// Pure decision logic: given a snapshot of (session, roles, company row) and
// the navigation target, decide whether the request passes, is blocked, or is
// redirected to plan selection. All reads happen in the caller; this module
// never touches the database, which is what makes the policy testable.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::company::{Company, PlanStatus};

/// Paths that stay reachable with an expired subscription, so the user can
/// pick a plan, manage billing, or reach the admin area.
pub const EXEMPT_PATH_PREFIXES: [&str; 3] = ["/escolher-plano", "/assinatura", "/admin"];

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Terminal outcome of one gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Serve normally; other auth layers own their own denials
    PassThrough,
    /// Account administratively blocked, any path, any plan
    Blocked,
    /// Subscription lapsed; send the caller to plan selection
    TrialExpiredRedirect,
}

/// What the gate reads from the company row. Detached from the diesel model
/// so tests can build states directly.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub plan_status: Option<PlanStatus>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub partner_ends_at: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub is_partner: bool,
}

impl From<&Company> for AccountSnapshot {
    fn from(company: &Company) -> Self {
        Self {
            plan_status: company.plan_status(),
            trial_ends_at: company.trial_ends_at,
            partner_ends_at: company.partner_ends_at,
            is_blocked: company.is_blocked,
            is_partner: company.is_partner,
        }
    }
}

/// Evaluation input. `account: None` means no company row was found for the
/// session owner, which is a data-availability gap and passes through.
#[derive(Debug, Clone)]
pub struct GateContext {
    pub session_present: bool,
    pub is_super_admin: bool,
    pub account: Option<AccountSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateOutcome {
    pub decision: AccessDecision,
    /// Days until trial/partner expiry, ceil-rounded; surfaced so the UI can
    /// show a countdown. None for plans without an expiry field.
    pub days_remaining: Option<i64>,
}

impl GateOutcome {
    fn pass(days_remaining: Option<i64>) -> Self {
        Self {
            decision: AccessDecision::PassThrough,
            days_remaining,
        }
    }
}

/// Ceil of the remaining time in days. `ends_at = now + 3d` gives 3;
/// one second past the deadline gives 0.
pub fn days_remaining(ends_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (ends_at - now).num_seconds() as f64;
    (seconds / SECONDS_PER_DAY).ceil() as i64
}

pub fn is_exempt_path(path: &str) -> bool {
    EXEMPT_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Evaluate the gate for one request. Checks run in a fixed order: session,
/// super admin, account presence, block flag, then plan state against the
/// path.
pub fn evaluate(ctx: &GateContext, path: &str, now: DateTime<Utc>) -> GateOutcome {
    // 1. No session: other auth mechanisms decide.
    if !ctx.session_present {
        return GateOutcome::pass(None);
    }

    // 2. Super admin bypasses every other check.
    if ctx.is_super_admin {
        return GateOutcome::pass(None);
    }

    // 3. No company row: fail-open data gap, not a denial.
    let account = match &ctx.account {
        Some(account) => account,
        None => return GateOutcome::pass(None),
    };

    // 4. Administrative block wins over plan state and path.
    if account.is_blocked {
        return GateOutcome {
            decision: AccessDecision::Blocked,
            days_remaining: None,
        };
    }

    // 5. Plan state.
    let mut expired = false;
    let mut remaining = None;

    match account.plan_status {
        Some(PlanStatus::Trial) => {
            if let Some(ends_at) = account.trial_ends_at {
                let days = days_remaining(ends_at, now);
                remaining = Some(days);
                if days <= 0 {
                    expired = true;
                }
            }
        },
        Some(PlanStatus::Partner) => {
            // Countdown surfaced but never enforced. Open product question,
            // kept as observed behavior.
            if let Some(ends_at) = account.partner_ends_at {
                remaining = Some(days_remaining(ends_at, now));
            }
        },
        Some(PlanStatus::Cancelled) | Some(PlanStatus::Overdue) => {
            // Cancelled = user cancelled; overdue = payment failed after
            // trial. Both reuse the expired-trial redirect.
            expired = true;
        },
        Some(PlanStatus::Active) | None => {},
    }

    // 6. Expired subscriptions keep the billing/plan/admin paths reachable.
    if expired && !is_exempt_path(path) {
        return GateOutcome {
            decision: AccessDecision::TrialExpiredRedirect,
            days_remaining: remaining,
        };
    }

    GateOutcome::pass(remaining)
}

/// Explicit fail-open policy: a read error is logged by the caller and the
/// request proceeds. Availability over strictness, never deny on a transient
/// backend failure.
pub fn fail_open() -> GateOutcome {
    GateOutcome::pass(None)
}
