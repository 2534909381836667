//! Small JSON helpers shared across client operations.

pub mod envelope;
