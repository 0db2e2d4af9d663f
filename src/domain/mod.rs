// Domain layer: reference/dose models and the source port. No I/O here.

pub mod model;
pub mod ports;
