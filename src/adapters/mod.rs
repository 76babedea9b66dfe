// Adapters layer: concrete implementations for external systems (product API, images).

pub mod http;
pub mod image;
