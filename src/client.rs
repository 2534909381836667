//! Client interface for the Mardify backend.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
mod endpoint;
mod probe;

pub use builder::MardifyClientBuilder;
pub use core::{MardifyClient, ProfilePhoto, ProfileUpdate};
