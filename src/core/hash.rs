// Hashing utilities

use sha2::{Digest, Sha256};

use crate::core::Hash256;

/// SHA256 double hash, the chain's identity function for headers and transactions.
/// hash256 = SHA256(SHA256(data))
#[inline]
pub fn hash256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash256::new(second.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash256_known_vector() {
        // SHA256d("hello")
        let hash = hash256(b"hello");
        assert_eq!(
            hex::encode(hash.as_bytes()),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn test_hash256_is_not_single_sha256() {
        let single: [u8; 32] = Sha256::digest(b"hello").into();
        assert_ne!(hash256(b"hello").0, single);
    }
}
