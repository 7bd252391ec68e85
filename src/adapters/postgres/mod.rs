//! PostgreSQL adapters - implementations of the persistence ports.

mod email_store;

pub use email_store::PgEmailStore;
