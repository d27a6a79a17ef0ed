// Domain layer: topology model, sheet grids and the ports (interfaces) the core depends on.

pub mod model;
pub mod ports;
pub mod sheet;
