// Domain layer: entity models and the CRUD port the rest of the crate
// depends on. Everything above the adapters uses these names only.

pub mod model;
pub mod ports;
