// Merkle root computation

use crate::core::{Hash256, hash256};

/// Fold an ordered list of leaf digests into a merkle root.
///
/// - no leaves: the zero hash
/// - one leaf: the leaf itself, without hashing
/// - otherwise adjacent pairs are double hashed level by level; a level with
///   an odd count pairs its last digest with itself
pub fn compute_merkle_root(leaves: &[Hash256]) -> Hash256 {
    match leaves {
        [] => return Hash256::zero(),
        [single] => return *single,
        _ => {}
    }

    let mut level: Vec<Hash256> = leaves.to_vec();

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = &pair[0];
                let right = pair.get(1).unwrap_or(left);
                hash_pair(left, right)
            })
            .collect();
    }

    level[0]
}

/// hash256(left ++ right)
pub fn hash_pair(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(left.as_bytes());
    combined[32..].copy_from_slice(right.as_bytes());
    hash256(&combined)
}
