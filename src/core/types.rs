// Basic types shared by the encoder, the merkle reducer and the miner

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{GenesisError, Result};

/// 256-bit digest (32 bytes) in internal byte order.
///
/// Block hashes, transaction IDs and merkle roots are all `Hash256`. The bytes
/// are stored exactly as the hash function produced them; `Display` and
/// `to_hex` reverse them, which is how the chain shows hashes to people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Create a Hash256 from a slice of exactly 32 bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| {
            GenesisError::Decode(format!(
                "invalid hash length: expected 32, got {}",
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// All-zero hash (genesis prev_block_hash, empty merkle root)
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Hex in display order (byte-reversed)
    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Parse display-order hex, as printed by `to_hex`
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| GenesisError::Decode(format!("invalid hex string: {}", e)))?;
        let mut hash = Self::from_slice(&bytes)?;
        hash.0.reverse();
        Ok(hash)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash256_zero() {
        let zero = Hash256::zero();
        assert_eq!(zero.as_bytes(), &[0u8; 32]);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_hex_is_byte_reversed() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        bytes[31] = 0x01;
        let hash = Hash256::new(bytes);

        let hex = hash.to_hex();
        assert!(hex.starts_with("01"));
        assert!(hex.ends_with("ab"));
        assert_eq!(Hash256::from_hex(&hex).unwrap(), hash);
        assert_eq!(Hash256::from_hex(&format!("0x{}", hex)).unwrap(), hash);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert!(Hash256::from_slice(&[0u8; 31]).is_err());
        assert!(Hash256::from_hex("abcd").is_err());
        assert!(Hash256::from_hex("zz").is_err());
    }

    #[test]
    fn test_serializes_as_display_hex() {
        let hash = Hash256::new([0x11; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(32)));
    }
}
