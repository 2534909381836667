//! HTTP transport over the fixed backend host.

pub mod http;

pub use http::HttpTransport;
