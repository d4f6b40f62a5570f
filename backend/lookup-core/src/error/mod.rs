pub mod config;
pub mod dispatch;
pub mod storage;
pub mod transport;

pub use config::ConfigError;
pub use dispatch::{DispatchError, LiveQueryError};
pub use storage::StorageError;
pub use transport::TransportError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
