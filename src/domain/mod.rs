// Domain layer: growth models, risk catalog and ports. No I/O.

pub mod model;
pub mod ports;
pub mod risk;
