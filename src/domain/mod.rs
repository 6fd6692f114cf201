// Domain layer: backend contract models and ports (interfaces).

pub mod model;
pub mod ports;
