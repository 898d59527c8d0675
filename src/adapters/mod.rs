// Adapters layer: concrete ports for the remote collection store and
// the in-memory substitute used in tests and offline runs.

pub mod http;
pub mod memory;
