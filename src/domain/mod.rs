// Domain layer: product and cart models plus the ports the adapters implement.

pub mod model;
pub mod ports;
