// Block header

use std::io::Cursor;

use crate::core::serialize::{ensure_consumed, read_hash, read_u32_le};
use crate::core::{Hash256, hash256};
use crate::error::{GenesisError, Result};

/// Serialized header length
pub const HEADER_SIZE: usize = 80;

/// Offset of the nonce inside the serialized header
pub const NONCE_OFFSET: usize = 76;

/// Block header - 80 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u32,
    /// Hash of the previous block (zero for genesis)
    pub prev_block_hash: Hash256,
    pub merkle_root: Hash256,
    /// Block timestamp (Unix epoch)
    pub timestamp: u32,
    /// Difficulty target (compact format)
    pub bits: u32,
    pub nonce: u32,
}

impl BlockHeader {
    pub fn new(
        version: u32,
        prev_block_hash: Hash256,
        merkle_root: Hash256,
        timestamp: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_block_hash,
            merkle_root,
            timestamp,
            bits,
            nonce,
        }
    }

    pub fn hash(&self) -> Hash256 {
        hash256(&self.serialize())
    }

    /// version(4) + prev hash(32) + merkle root(32) + timestamp(4) + bits(4) + nonce(4)
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];
        header[..NONCE_OFFSET].copy_from_slice(&self.serialize_without_nonce());
        header[NONCE_OFFSET..].copy_from_slice(&self.nonce.to_le_bytes());
        header
    }

    /// Everything except the nonce; the miner only rewrites the last 4 bytes.
    pub fn serialize_without_nonce(&self) -> [u8; NONCE_OFFSET] {
        let mut header = [0u8; NONCE_OFFSET];
        header[0..4].copy_from_slice(&self.version.to_le_bytes());
        header[4..36].copy_from_slice(self.prev_block_hash.as_bytes());
        header[36..68].copy_from_slice(self.merkle_root.as_bytes());
        header[68..72].copy_from_slice(&self.timestamp.to_le_bytes());
        header[72..76].copy_from_slice(&self.bits.to_le_bytes());
        header
    }

    /// Decode an 80-byte header
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() != HEADER_SIZE {
            return Err(GenesisError::Decode(format!(
                "block header must be {} bytes, got {}",
                HEADER_SIZE,
                data.len()
            )));
        }

        let mut cursor = Cursor::new(data);
        let header = Self {
            version: read_u32_le(&mut cursor)?,
            prev_block_hash: read_hash(&mut cursor)?,
            merkle_root: read_hash(&mut cursor)?,
            timestamp: read_u32_le(&mut cursor)?,
            bits: read_u32_le(&mut cursor)?,
            nonce: read_u32_le(&mut cursor)?,
        };
        ensure_consumed(data, cursor.position() as usize)?;
        Ok(header)
    }

    pub fn is_genesis(&self) -> bool {
        self.prev_block_hash.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BlockHeader {
        BlockHeader::new(
            1,
            Hash256::new([0x12; 32]),
            Hash256::new([0x34; 32]),
            1732924800,
            0x1e00ffff,
            0xdeadbeef,
        )
    }

    #[test]
    fn test_block_header_layout() {
        let header = sample_header();
        let serialized = header.serialize();

        assert_eq!(serialized.len(), 80);
        assert_eq!(&serialized[0..4], &[0x01, 0x00, 0x00, 0x00]);
        assert_eq!(&serialized[4..36], &[0x12; 32]);
        assert_eq!(&serialized[36..68], &[0x34; 32]);
        assert_eq!(&serialized[68..72], &1732924800u32.to_le_bytes());
        assert_eq!(&serialized[72..76], &[0xff, 0xff, 0x00, 0x1e]);
        assert_eq!(&serialized[76..80], &[0xef, 0xbe, 0xad, 0xde]);
        assert_eq!(&serialized[..NONCE_OFFSET], &header.serialize_without_nonce()[..]);
    }

    #[test]
    fn test_block_header_roundtrip() {
        let extremes = [
            BlockHeader::new(0, Hash256::zero(), Hash256::zero(), 0, 0, 0),
            BlockHeader::new(
                u32::MAX,
                Hash256::new([0xff; 32]),
                Hash256::new([0xff; 32]),
                u32::MAX,
                u32::MAX,
                u32::MAX,
            ),
            sample_header(),
        ];

        for header in extremes {
            let serialized = header.serialize();
            assert_eq!(serialized.len(), HEADER_SIZE);
            let decoded = BlockHeader::deserialize(&serialized).unwrap();
            assert_eq!(decoded, header);
            assert_eq!(decoded.serialize(), serialized);
        }
    }

    #[test]
    fn test_deserialize_wrong_length() {
        assert!(BlockHeader::deserialize(&[0u8; 79]).is_err());
        assert!(BlockHeader::deserialize(&[0u8; 81]).is_err());
    }

    #[test]
    fn test_nonce_changes_hash() {
        let header = sample_header();
        let mut other = header.clone();
        other.nonce += 1;
        assert_ne!(header.hash(), other.hash());
        assert_eq!(header.hash(), sample_header().hash());
    }

    #[test]
    fn test_is_genesis() {
        let mut header = sample_header();
        assert!(!header.is_genesis());
        header.prev_block_hash = Hash256::zero();
        assert!(header.is_genesis());
    }
}
