pub mod batch;
pub mod config;
pub mod credentials;
pub mod destination;
pub mod source;
pub mod staging;
pub mod testing;
pub mod transfer;

pub use batch::{
    BatchConfig, BatchError, BatchOrchestrator, BatchStatus, BatchSummary, GoogleStoreFactory,
    StoreFactory, StoreHandles,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, CredentialsMethod,
    SanitizedConfig,
};
pub use credentials::{create_token_provider, CredentialsError, TokenProvider};
pub use destination::{DestinationError, DestinationStore, GcsClient};
pub use source::{DriveClient, FileDescriptor, SourceError, SourceStore};
pub use staging::{StagingArea, StagingError, StagingHandle};
pub use transfer::{
    MovedFile, TransferConfig, TransferError, TransferFailure, TransferOutcome, TransferUnit,
};
