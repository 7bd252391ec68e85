//! Contact HTTP module - email capture and schema bootstrap endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContactAppState;
pub use routes::contact_router;
