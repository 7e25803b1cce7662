pub mod cache;
pub mod circuit_breaker;
pub mod images;
pub mod remote;
pub mod shared;
pub mod store;
