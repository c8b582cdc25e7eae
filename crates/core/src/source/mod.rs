//! Source store abstraction.
//!
//! This module provides a `SourceStore` trait for the document store files
//! are moved out of, and the Google Drive implementation.

mod drive;
mod types;

pub use drive::DriveClient;
pub use types::*;
