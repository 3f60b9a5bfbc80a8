// Proof of Work search
//
// The search is sequential: nonces are tried in increasing order, so the
// first qualifying nonce is always the smallest one and every run over the
// same header yields the same result.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use crate::consensus::target::{CompactTarget, U256, hash_to_u256, u256_to_hex};
use crate::core::{BlockHeader, HEADER_SIZE, Hash256, NONCE_OFFSET, hash256};

/// Nonces between two progress callbacks
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Snapshot handed to a `SearchObserver`
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Last nonce tried
    pub nonce: u32,
    /// Hashes computed so far
    pub attempts: u64,
    pub elapsed: Duration,
}

impl Progress {
    pub fn hash_rate(&self) -> f64 {
        hash_rate(self.attempts, self.elapsed)
    }
}

/// Receives progress while a search runs. Observers cannot influence the
/// search: they see copies and return nothing.
pub trait SearchObserver {
    fn on_progress(&mut self, _progress: &Progress) {}
}

/// Silent observer
impl SearchObserver for () {}

/// A header hash below the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub nonce: u32,
    pub hash: Hash256,
}

/// Terminal state of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Solution),
    /// No nonce in the searched range qualified
    Exhausted,
}

/// Search result with the statistics the reporter needs
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub attempts: u64,
    pub duration: Duration,
}

impl SearchReport {
    pub fn hash_rate(&self) -> f64 {
        hash_rate(self.attempts, self.duration)
    }

    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            SearchOutcome::Found(solution) => Some(solution),
            SearchOutcome::Exhausted => None,
        }
    }
}

/// Nonce searcher over a header whose other fields are fixed.
///
/// The header prefix is serialized once at construction; nothing can change
/// it afterwards, so every hash in a search covers the same fields.
pub struct Searcher {
    header_prefix: [u8; NONCE_OFFSET],
    target: U256,
    progress_interval: u64,
}

impl Searcher {
    /// Search `header` (its nonce is ignored) against the target its bits encode
    pub fn new(header: &BlockHeader) -> Self {
        Self::with_target(header, CompactTarget::from_bits(header.bits).to_target())
    }

    /// Search `header` against an explicit target
    pub fn with_target(header: &BlockHeader, target: U256) -> Self {
        Self {
            header_prefix: header.serialize_without_nonce(),
            target,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Nonces between progress callbacks; 0 disables them
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn target(&self) -> &U256 {
        &self.target
    }

    /// Search the whole nonce space, 0 through 0xffffffff
    pub fn search(&self, observer: &mut dyn SearchObserver) -> SearchReport {
        self.search_range(0..=u32::MAX, observer)
    }

    /// Search `nonces` in increasing order, stopping at the first hash below
    /// the target.
    pub fn search_range(
        &self,
        nonces: RangeInclusive<u32>,
        observer: &mut dyn SearchObserver,
    ) -> SearchReport {
        let start_time = Instant::now();

        if self.target.is_zero() {
            log::warn!("Target is zero; no header hash can satisfy it");
            return SearchReport {
                outcome: SearchOutcome::Exhausted,
                attempts: 0,
                duration: start_time.elapsed(),
            };
        }

        log::debug!(
            "Searching nonces {}..={} against target {}",
            nonces.start(),
            nonces.end(),
            u256_to_hex(&self.target)
        );

        let mut header = [0u8; HEADER_SIZE];
        header[..NONCE_OFFSET].copy_from_slice(&self.header_prefix);
        let mut attempts = 0u64;

        // RangeInclusive iteration ends after u32::MAX without overflowing
        for nonce in nonces {
            header[NONCE_OFFSET..].copy_from_slice(&nonce.to_le_bytes());
            let hash = hash256(&header);
            attempts += 1;

            if hash_to_u256(&hash) < self.target {
                let duration = start_time.elapsed();
                log::debug!("Nonce {} satisfies the target after {} attempts", nonce, attempts);
                return SearchReport {
                    outcome: SearchOutcome::Found(Solution { nonce, hash }),
                    attempts,
                    duration,
                };
            }

            if self.progress_interval > 0 && attempts % self.progress_interval == 0 {
                let progress = Progress {
                    nonce,
                    attempts,
                    elapsed: start_time.elapsed(),
                };
                log::debug!(
                    "Mining attempts: {} ({:.1} KH/s)",
                    attempts,
                    progress.hash_rate() / 1000.0
                );
                observer.on_progress(&progress);
            }
        }

        SearchReport {
            outcome: SearchOutcome::Exhausted,
            attempts,
            duration: start_time.elapsed(),
        }
    }
}

/// True when the header hash is below the non-zero target its bits encode
pub fn verify_header(header: &BlockHeader) -> bool {
    let target = CompactTarget::from_bits(header.bits).to_target();
    !target.is_zero() && hash_to_u256(&header.hash()) < target
}

fn hash_rate(attempts: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { attempts as f64 / secs } else { 0.0 }
}
