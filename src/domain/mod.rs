// Domain layer: canonical models and ports. No knowledge of HTTP or disk.

pub mod model;
pub mod ports;
