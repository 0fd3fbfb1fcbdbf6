pub mod client;
pub mod errors;
pub mod wire;

pub use client::HttpApiClient;
