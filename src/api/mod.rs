pub mod client;
pub mod fetch;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use client::ApiClient;
pub use fetch::FetchTransport;
pub use http::HttpTransport;
