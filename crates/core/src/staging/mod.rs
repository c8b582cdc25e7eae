//! Local staging of file bytes between download and upload.
//!
//! A [`StagingArea`] hands out [`StagingHandle`]s, each owning one uniquely
//! named file in the staging directory. Handles delete their file when they
//! go out of scope, on every exit path of the caller.
//!
//! # Example
//!
//! ```ignore
//! use drivemove_core::staging::StagingArea;
//!
//! let area = StagingArea::in_temp_dir();
//! let handle = area.acquire("track01.wav").await?;
//! handle.write(&bytes).await?;
//! upload(handle.path()).await?;
//! // staged file removed here
//! ```

mod area;
mod error;

pub use area::{StagingArea, StagingHandle};
pub use error::StagingError;
