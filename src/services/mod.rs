// Services module for the Navalha backend
// Business logic layer for the application

pub mod access_gate;
pub mod campaign;

// Re-export commonly used services
pub use access_gate::{
    days_remaining, evaluate, fail_open, is_exempt_path, AccessDecision, AccountSnapshot,
    GateContext, GateOutcome, EXEMPT_PATH_PREFIXES,
};
pub use campaign::CampaignService;
