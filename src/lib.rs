//! Advisory Board - AI board consultation backend
//!
//! This crate implements the board-consultation workflow: one user query is
//! routed to the relevant persona advisors, each selected persona answers
//! concurrently, and continued use is gated behind a per-session free-question
//! budget with email capture.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
