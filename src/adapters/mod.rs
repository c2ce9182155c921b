// Adapters layer: concrete implementations of the domain ports (remote API over HTTP, CSV product files).

pub mod http;
pub mod storage;
