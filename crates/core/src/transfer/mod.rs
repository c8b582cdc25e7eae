//! Transfer module for moving single files between stores.
//!
//! A [`TransferUnit`] moves one file in three strictly ordered steps:
//!
//! 1. Download the file content from the source store into a staging file
//! 2. Upload the staging file to the destination store
//! 3. Delete the file from the source store
//!
//! A failure at any step stops the move and is returned as a
//! [`TransferOutcome::Failure`]; the unit never propagates errors. The staging
//! file is removed on every path.

mod config;
mod types;
mod unit;

pub use config::TransferConfig;
pub use types::{
    MovedFile, TransferError, TransferFailure, TransferOutcome, TransferStep,
};
pub use unit::TransferUnit;
