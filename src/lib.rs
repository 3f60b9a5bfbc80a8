// Genesis block construction and proof-of-work mining

pub mod core;
pub mod consensus;
pub mod genesis;
pub mod report;
pub mod cli;
pub mod error;

// Re-exports for convenience
pub use crate::core::{BlockHeader, Hash256, OutPoint, Script, Transaction, TxInput, TxOutput};
pub use crate::consensus::{CompactTarget, SearchOutcome, Searcher, U256, decode_compact};
pub use crate::genesis::{GenesisParams, GenesisTemplate, MinedGenesis, Network, build_coinbase, mine_genesis};
pub use crate::error::{GenesisError, Result};
