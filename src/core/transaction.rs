// Transaction data structures

use std::io::{Cursor, Read};

use crate::core::serialize::{
    ensure_consumed, read_compact_len, read_hash, read_u32_le, read_u64_le, read_var_bytes,
    write_compact_len, write_hash, write_u32_le, write_u64_le, write_var_bytes,
};
use crate::core::{Hash256, Script, hash256};
use crate::error::{GenesisError, Result};

/// Index sentinel meaning "no previous output"
pub const NULL_INDEX: u32 = 0xffffffff;

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutPoint {
    pub hash: Hash256,
    pub index: u32,
}

impl OutPoint {
    pub fn new(hash: Hash256, index: u32) -> Self {
        Self { hash, index }
    }

    /// The outpoint a coinbase input spends: zero hash, index 0xffffffff
    pub fn null() -> Self {
        Self {
            hash: Hash256::zero(),
            index: NULL_INDEX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == NULL_INDEX
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    pub previous_output: OutPoint,
    /// Signature script (for a coinbase: arbitrary data)
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxInput {
    pub fn new(previous_output: OutPoint, script_sig: Script) -> Self {
        Self {
            previous_output,
            script_sig,
            sequence: 0xffffffff,
        }
    }

    /// Create a coinbase input
    pub fn coinbase(script_sig: Script) -> Self {
        Self::new(OutPoint::null(), script_sig)
    }

    pub fn is_coinbase(&self) -> bool {
        self.previous_output.is_null()
    }

    /// prev hash(32) + prev index(4) + script(1 + n) + sequence(4)
    pub fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<()> {
        write_hash(buf, &self.previous_output.hash);
        write_u32_le(buf, self.previous_output.index);
        write_var_bytes(buf, self.script_sig.as_bytes())?;
        write_u32_le(buf, self.sequence);
        Ok(())
    }

    pub fn deserialize(reader: &mut dyn Read) -> Result<Self> {
        let hash = read_hash(reader)?;
        let index = read_u32_le(reader)?;
        let script_sig = Script::try_from(read_var_bytes(reader)?)?;
        let sequence = read_u32_le(reader)?;

        Ok(Self {
            previous_output: OutPoint::new(hash, index),
            script_sig,
            sequence,
        })
    }
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    /// Amount in base units
    pub value: u64,
    pub script_pubkey: Script,
}

impl TxOutput {
    pub fn new(value: u64, script_pubkey: Script) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }

    /// value(8) + script(1 + n)
    pub fn serialize_into(&self, buf: &mut Vec<u8>) -> Result<()> {
        write_u64_le(buf, self.value);
        write_var_bytes(buf, self.script_pubkey.as_bytes())
    }

    pub fn deserialize(reader: &mut dyn Read) -> Result<Self> {
        let value = read_u64_le(reader)?;
        let script_pubkey = Script::try_from(read_var_bytes(reader)?)?;
        Ok(Self {
            value,
            script_pubkey,
        })
    }
}

/// Transaction. Identity is the double hash of its serialized bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        Self {
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
        }
    }

    /// Create a single-input, single-output coinbase transaction
    pub fn coinbase(script_sig: Script, output: TxOutput) -> Self {
        Self::new(vec![TxInput::coinbase(script_sig)], vec![output])
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    pub fn total_output_value(&self) -> u64 {
        self.outputs.iter().map(|out| out.value).sum()
    }

    /// version(4) + input count(1) + inputs + output count(1) + outputs + locktime(4)
    ///
    /// Scripts are bounded by `Script`, so this only fails when a transaction
    /// carries 0xfd or more inputs or outputs.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.estimated_size());

        write_u32_le(&mut buf, self.version);

        write_compact_len(&mut buf, self.inputs.len())?;
        for input in &self.inputs {
            input.serialize_into(&mut buf)?;
        }

        write_compact_len(&mut buf, self.outputs.len())?;
        for output in &self.outputs {
            output.serialize_into(&mut buf)?;
        }

        write_u32_le(&mut buf, self.lock_time);

        Ok(buf)
    }

    /// Transaction ID (double SHA256 of the serialized transaction)
    pub fn txid(&self) -> Result<Hash256> {
        Ok(hash256(&self.serialize()?))
    }

    pub fn from_reader(reader: &mut dyn Read) -> Result<Self> {
        let version = read_u32_le(reader)?;

        let input_count = read_compact_len(reader)?;
        let mut inputs = Vec::with_capacity(input_count);
        for _ in 0..input_count {
            inputs.push(TxInput::deserialize(reader)?);
        }

        let output_count = read_compact_len(reader)?;
        let mut outputs = Vec::with_capacity(output_count);
        for _ in 0..output_count {
            outputs.push(TxOutput::deserialize(reader)?);
        }

        let lock_time = read_u32_le(reader)?;

        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    /// Decode a transaction that occupies all of `data`
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let tx = Self::from_reader(&mut cursor)?;
        let consumed = usize::try_from(cursor.position())
            .map_err(|_| GenesisError::Decode("cursor position overflow".to_string()))?;
        ensure_consumed(data, consumed)?;
        Ok(tx)
    }

    fn estimated_size(&self) -> usize {
        let inputs: usize = self.inputs.iter().map(|i| 41 + i.script_sig.len()).sum();
        let outputs: usize = self.outputs.iter().map(|o| 9 + o.script_pubkey.len()).sum();
        10 + inputs + outputs
    }
}
