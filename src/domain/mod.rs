// Domain layer: entity models and the ports the repositories, commands and
// binary are wired through.

pub mod model;
pub mod ports;
