mod client;
pub mod endpoint;
mod types;

pub use client::GeminiClient;
