//! Batch module for moving a whole source folder.
//!
//! A [`BatchOrchestrator`] connects to the stores through a [`StoreFactory`],
//! lists the source folder and hands each file to a
//! [`TransferUnit`](crate::transfer::TransferUnit). One file's failure never
//! stops the batch; only client setup or listing failures end a run early.
//!
//! # Example
//!
//! ```ignore
//! use drivemove_core::batch::{BatchConfig, BatchOrchestrator, GoogleStoreFactory};
//!
//! let factory = GoogleStoreFactory::from_config(&config)?;
//! let orchestrator = BatchOrchestrator::new(BatchConfig::from(&config), Arc::new(factory));
//!
//! let summary = orchestrator.run().await;
//! println!("{}: moved {} files", summary.status.as_str(), summary.processed_count);
//! ```

mod factory;
mod orchestrator;
mod types;

pub use factory::{GoogleStoreFactory, StoreFactory, StoreHandles};
pub use orchestrator::BatchOrchestrator;
pub use types::{
    BatchConfig, BatchError, BatchStatus, BatchSummary, EMPTY_FOLDER_MESSAGE, RUN_FAILED_MESSAGE,
};
