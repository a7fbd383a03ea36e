//! HTTP front end

pub mod chat;
pub mod error;
pub mod health;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
