// Error types for genesis construction and mining

use thiserror::Error;

use crate::core::ScriptError;

#[derive(Error, Debug)]
pub enum GenesisError {
    /// Every nonce in 0..=u32::MAX was tried without reaching the target
    #[error("nonce space exhausted after {attempts} attempts (timestamp {timestamp}); try a different timestamp")]
    NonceExhausted { timestamp: u32, attempts: u64 },

    /// Coinbase message does not fit behind a single-byte length prefix
    #[error("coinbase message is {len} bytes; at most 255 bytes are supported")]
    MessageTooLong { len: usize },

    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// Raw length-prefixed field is too long for the single-byte prefix
    #[error("variable-length field is {len} bytes; at most 252 bytes are supported")]
    VarBytesTooLong { len: usize },

    /// A given nonce does not produce a header hash below the target
    #[error("nonce {nonce} does not satisfy bits {bits:#010x}")]
    ProofOfWorkNotMet { nonce: u32, bits: u32 },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenesisError>;
