// Compact difficulty encoding ("bits") and 256-bit targets

use std::fmt;

use uint::construct_uint;

use crate::core::Hash256;

construct_uint! {
    /// Unsigned 256-bit integer made of 4 x 64-bit little-endian words
    pub struct U256(4);
}

/// Largest exponent that still places the mantissa inside 256 bits
const MAX_SIZE: u32 = 32;

/// A 32-bit compact target: exponent byte (`size`) and 23-bit mantissa
/// (`word`). Bit 23 is a sign flag that is ignored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Bitcoin's difficulty-1 target
    pub const DIFFICULTY_ONE: CompactTarget = CompactTarget(0x1d00ffff);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn size(&self) -> u32 {
        self.0 >> 24
    }

    pub const fn mantissa(&self) -> u32 {
        self.0 & 0x007fffff
    }

    /// Expand to the full target:
    /// `size <= 3 ? word >> 8*(3-size) : word << 8*(size-3)`.
    ///
    /// No normalization and no negative or overflow handling. Exponents above
    /// 32 are clamped to 32, which keeps the result defined for any input.
    pub fn to_target(&self) -> U256 {
        let size = self.size().min(MAX_SIZE);
        let word = self.mantissa();

        if size <= 3 {
            U256::from(word >> (8 * (3 - size)))
        } else {
            U256::from(word) << (8 * (size - 3)) as usize
        }
    }

    /// Smallest compact form of `target`. The mantissa never has bit 23 set;
    /// when it would, the exponent grows by one instead.
    pub fn from_target(target: &U256) -> Self {
        let mut size = target.bits().div_ceil(8);
        let mut compact = if size <= 3 {
            (target.low_u64() << (8 * (3 - size))) as u32
        } else {
            (*target >> (8 * (size - 3))).low_u64() as u32
        };

        if compact & 0x00800000 != 0 {
            compact >>= 8;
            size += 1;
        }

        Self(((size as u32) << 24) | compact)
    }

    /// Difficulty relative to 0x1d00ffff; infinite for a zero target
    pub fn difficulty(&self) -> f64 {
        let target = u256_to_f64(&self.to_target());
        if target == 0.0 {
            return f64::INFINITY;
        }
        u256_to_f64(&Self::DIFFICULTY_ONE.to_target()) / target
    }
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Decode compact bits into a 256-bit target
pub fn decode_compact(bits: u32) -> U256 {
    CompactTarget::from_bits(bits).to_target()
}

/// Encode a 256-bit target into compact bits
pub fn encode_compact(target: &U256) -> u32 {
    CompactTarget::from_target(target).bits()
}

/// Interpret a digest as a little-endian unsigned integer
#[inline]
pub fn hash_to_u256(hash: &Hash256) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// 64 hex digits, most significant first
pub fn u256_to_hex(value: &U256) -> String {
    value.0.iter().rev().map(|word| format!("{:016x}", word)).collect()
}

fn u256_to_f64(value: &U256) -> f64 {
    value
        .0
        .iter()
        .enumerate()
        .map(|(i, word)| *word as f64 * 2f64.powi(64 * i as i32))
        .sum()
}
