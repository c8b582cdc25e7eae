//! Destination store abstraction.
//!
//! This module provides a `DestinationStore` trait for the object store files
//! are moved into, and the Google Cloud Storage implementation.

mod gcs;
mod types;

pub use gcs::GcsClient;
pub use types::*;
