// Core data structures and the binary wire format

mod types;
mod transaction;
mod block;
mod hash;
pub mod merkle;
pub mod script;
pub mod serialize;

pub use types::*;
pub use transaction::*;
pub use block::*;
pub use hash::*;
pub use merkle::compute_merkle_root;
pub use script::{OpCode, Script, ScriptBuilder, ScriptError};
