// Middleware modules for the Navalha backend

pub mod auth;
pub mod cors;
pub mod subscription;

// Re-export auth types
pub use auth::{auth_middleware, AuthenticatedUser};
pub use cors::callback_cors_layer;
pub use subscription::subscription_guard;
