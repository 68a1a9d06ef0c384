// Domain layer: request/brief/asset models, the model-call contract and ports.

pub mod generation;
pub mod model;
pub mod ports;
