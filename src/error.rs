use crate::hap::characteristic::CharacteristicFormat;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AccessoryError {
    #[error("key-value store operation failed: {0}")]
    Store(String),

    #[error("duplicate instance id {0:#06x} in attribute database")]
    DuplicateInstanceId(u64),

    #[error("service {0:#06x} declares no characteristics")]
    EmptyService(u64),

    #[error("readable characteristic {0:#06x} has no read handler")]
    MissingReadHandler(u64),

    #[error("service {0:#06x} not found")]
    ServiceNotFound(u64),

    #[error("characteristic {0:#06x} not found")]
    CharacteristicNotFound(u64),

    #[error("characteristic {0:#06x} is not writable")]
    NotWritable(u64),

    #[error("characteristic {iid:#06x} is not a {expected:?} characteristic")]
    FormatMismatch {
        iid: u64,
        expected: CharacteristicFormat,
    },

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AccessoryError>;
