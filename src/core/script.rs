// Script bytes for the coinbase input and output
//
// Only construction is needed here: the genesis coinbase is never executed,
// so there is no interpreter.

use thiserror::Error;

use crate::core::serialize::MAX_VAR_BYTES_LEN;

/// Opcodes used by the genesis scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Check signature
    OpCheckSig = 0xac,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("data push of {len} bytes does not fit a one-byte length")]
    PushTooLarge { len: usize },

    #[error("script of {len} bytes exceeds the {max}-byte limit", max = MAX_VAR_BYTES_LEN)]
    ScriptTooLong { len: usize },
}

/// Script bytes whose length always fits the single-byte length prefix used
/// by the transaction encoder, so serializing a transaction cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Pay-to-pubkey: <pubkey> OP_CHECKSIG
    pub fn pay_to_pubkey(pubkey: &[u8]) -> Result<Self, ScriptError> {
        let mut builder = ScriptBuilder::new();
        builder.push_slice(pubkey)?.push_opcode(OpCode::OpCheckSig);
        builder.into_script()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl TryFrom<Vec<u8>> for Script {
    type Error = ScriptError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() > MAX_VAR_BYTES_LEN {
            return Err(ScriptError::ScriptTooLong { len: bytes.len() });
        }
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Incremental script construction.
///
/// Data pushes are always written as a raw length byte followed by the data,
/// which is the form the genesis coinbase uses for every push.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    bytes: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_slice(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        let len = u8::try_from(data.len())
            .map_err(|_| ScriptError::PushTooLarge { len: data.len() })?;
        self.bytes.push(len);
        self.bytes.extend_from_slice(data);
        Ok(self)
    }

    pub fn push_opcode(&mut self, op: OpCode) -> &mut Self {
        self.bytes.push(op as u8);
        self
    }

    pub fn into_script(self) -> Result<Script, ScriptError> {
        Script::try_from(self.bytes)
    }
}
