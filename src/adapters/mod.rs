// Adapters layer: helpers over the reqwest HTTP types.

pub mod headers;
pub mod request;
