//! Board HTTP module - routing, consultation, and session endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BoardAppState;
pub use routes::board_router;
