// Domain layer: fleet entities and ports (interfaces). No dependencies beyond serde/chrono.

pub mod model;
pub mod ports;
