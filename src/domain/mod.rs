// Domain layer: plain models and the traits the helpers are generic over.

pub mod model;
pub mod ports;
