//! # mardify-client
//!
//! Async client for the Mardify chat service. It wraps the fixed backend host
//! behind a small typed surface: authentication, chat message retrieval and
//! send, user search, and profile setup, with local session persistence
//! (user object + bearer token) through an injected [`SessionStore`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mardify_client::MardifyClient;
//!
//! #[tokio::main]
//! async fn main() -> mardify_client::Result<()> {
//!     let client = MardifyClient::new()?;
//!
//!     client.login("user@example.com", "hunter2").await?;
//!     let messages = client.load_chat().await?;
//!     println!("{} messages", messages.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client operations and builder |
//! | [`config`] | Base host and timeout configuration |
//! | [`session`] | Session store trait, backends, and the typed session view |
//! | [`transport`] | HTTP transport over the backend host |
//! | [`utils`] | Envelope normalization helpers |

pub mod client;
pub mod config;
pub mod session;
pub mod transport;
pub mod utils;

// Re-export main types for convenience
pub use client::{MardifyClient, MardifyClientBuilder, ProfilePhoto, ProfileUpdate};
pub use config::ClientConfig;
pub use session::{FileSessionStore, MemorySessionStore, SessionHandle, SessionStore};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
