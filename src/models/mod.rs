pub mod barber;
pub mod campaign;
pub mod company;
pub mod payment;
pub mod user_role;

// Re-export common types
pub use barber::{Barber, CreateBarberRequest, NewBarber, UpdateBarberRequest};
pub use campaign::{
    Campaign, CampaignCompletion, CampaignMessageLog, DeliveryStatus, CAMPAIGN_STATUS_PROCESSING,
};
pub use company::{Company, PlanStatus};
pub use payment::{CreatePaymentRequest, NewPayment, Payment, PaymentMethod};
pub use user_role::{UserRole, ROLE_SUPER_ADMIN};
