//! HTTP adapters - REST API implementations.
//!
//! Each workflow module has its own HTTP adapter for endpoint exposure.

pub mod board;
mod common;
pub mod contact;

pub use board::{board_router, BoardAppState};
pub use common::SESSION_HEADER;
pub use contact::{contact_router, ContactAppState};
