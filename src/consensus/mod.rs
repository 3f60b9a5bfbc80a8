// Difficulty targets and proof-of-work search

pub mod pow;
pub mod target;

pub use pow::{Progress, SearchObserver, SearchOutcome, SearchReport, Searcher, Solution, verify_header};
pub use target::{CompactTarget, U256, decode_compact, encode_compact, hash_to_u256};
