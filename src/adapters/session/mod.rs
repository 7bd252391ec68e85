//! Session adapters - implementations of the SessionGate port.

mod in_memory;

pub use in_memory::InMemorySessionGate;
