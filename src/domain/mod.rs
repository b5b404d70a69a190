// Domain layer: models, lookup data, per-field rules and ports. No I/O here.

pub mod lookup;
pub mod model;
pub mod ports;
pub mod rules;
pub mod schema;
