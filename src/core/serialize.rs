// Binary encoding for the genesis wire format
//
// Integers are fixed-width little-endian. Variable-length byte strings carry a
// single length byte: the genesis domain never produces a field of 0xfd bytes
// or more, so the chain's multi-byte varint forms are not implemented and
// such fields are rejected instead of being mis-encoded.

use std::io::Read;

use crate::core::Hash256;
use crate::error::{GenesisError, Result};

/// Longest byte string that fits the single-byte length prefix
pub const MAX_VAR_BYTES_LEN: usize = 0xfc;

pub fn write_u32_le(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_u64_le(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

pub fn write_hash(buf: &mut Vec<u8>, hash: &Hash256) {
    buf.extend_from_slice(hash.as_bytes());
}

/// Write a count or length as its one-byte form
pub fn write_compact_len(buf: &mut Vec<u8>, len: usize) -> Result<()> {
    if len > MAX_VAR_BYTES_LEN {
        return Err(GenesisError::VarBytesTooLong { len });
    }
    buf.push(len as u8);
    Ok(())
}

/// Write bytes with length prefix (one length byte + data)
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    write_compact_len(buf, data.len())?;
    buf.extend_from_slice(data);
    Ok(())
}

pub fn read_u8<R: Read + ?Sized>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

pub fn read_u32_le<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    let mut bytes = [0u8; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}

pub fn read_u64_le<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes)?;
    Ok(u64::from_le_bytes(bytes))
}

pub fn read_hash<R: Read + ?Sized>(reader: &mut R) -> Result<Hash256> {
    let mut bytes = [0u8; 32];
    reader.read_exact(&mut bytes)?;
    Ok(Hash256::new(bytes))
}

/// Read a one-byte count or length
pub fn read_compact_len<R: Read + ?Sized>(reader: &mut R) -> Result<usize> {
    let len = read_u8(reader)?;
    if len as usize > MAX_VAR_BYTES_LEN {
        return Err(GenesisError::Decode(format!(
            "multi-byte length prefix 0x{:02x} is not supported",
            len
        )));
    }
    Ok(len as usize)
}

/// Read bytes with length prefix
pub fn read_var_bytes<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let len = read_compact_len(reader)?;
    let mut data = vec![0u8; len];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// Fail if a decoder left bytes unread
pub fn ensure_consumed(data: &[u8], consumed: usize) -> Result<()> {
    if consumed != data.len() {
        return Err(GenesisError::Decode(format!(
            "{} trailing bytes after {} decoded bytes",
            data.len() - consumed,
            consumed
        )));
    }
    Ok(())
}
