// Domain layer: plain models and ports. No HTTP framework types here.

pub mod model;
pub mod ports;
