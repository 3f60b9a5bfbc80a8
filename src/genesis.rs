// Genesis block construction and mining

use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::consensus::{CompactTarget, SearchObserver, SearchOutcome, Searcher, U256};
use crate::consensus::pow::DEFAULT_PROGRESS_INTERVAL;
use crate::core::{
    BlockHeader, Hash256, Script, ScriptBuilder, Transaction, TxOutput, compute_merkle_root,
};
use crate::error::{GenesisError, Result};

/// Base units per coin
pub const COIN: u64 = 100_000_000;

/// Difficulty bits pushed into every genesis coinbase script, whatever bits
/// the header carries (486604799)
pub const COINBASE_SCRIPT_BITS: u32 = 0x1d00ffff;

/// Well-known public key the genesis reward is paid to
pub const GENESIS_PUBKEY_HEX: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

pub const DEFAULT_TIMESTAMP: u32 = 1732924800;
pub const DEFAULT_MESSAGE: &str = "SuperAxeCoin - Mining for the rest of us";
pub const DEFAULT_VERSION: u32 = 1;
pub const DEFAULT_REWARD: u64 = 500 * COIN;

/// Chain whose genesis difficulty to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Main,
    Test,
    Regtest,
}

impl Network {
    pub fn genesis_bits(&self) -> u32 {
        match self {
            Network::Main => 0x1e00ffff,
            Network::Test => 0x1e0377ae,
            Network::Regtest => 0x207fffff,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Test => "test",
            Network::Regtest => "regtest",
        }
    }
}

/// Fixed inputs of a genesis search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisParams {
    pub timestamp: u32,
    /// Text embedded in the coinbase input script (at most 255 bytes)
    pub message: String,
    pub bits: u32,
    pub version: u32,
    /// Coinbase output value in base units
    pub reward: u64,
}

impl Default for GenesisParams {
    fn default() -> Self {
        Self::for_network(Network::Main)
    }
}

impl GenesisParams {
    pub fn for_network(network: Network) -> Self {
        Self {
            timestamp: DEFAULT_TIMESTAMP,
            message: DEFAULT_MESSAGE.to_string(),
            bits: network.genesis_bits(),
            version: DEFAULT_VERSION,
            reward: DEFAULT_REWARD,
        }
    }

    pub fn target(&self) -> U256 {
        CompactTarget::from_bits(self.bits).to_target()
    }
}

/// Build the genesis coinbase transaction.
///
/// Input script: push(bits 0x1d00ffff) push(0x04) push(message).
/// Output: `reward` paid to the well-known public key with OP_CHECKSIG.
pub fn build_coinbase(message: &str, reward: u64) -> Result<Transaction> {
    let len = message.len();
    if len > u8::MAX as usize {
        return Err(GenesisError::MessageTooLong { len });
    }

    let mut script_sig = ScriptBuilder::new();
    script_sig
        .push_slice(&COINBASE_SCRIPT_BITS.to_le_bytes())?
        .push_slice(&[4])?
        .push_slice(message.as_bytes())?;
    let script_sig = script_sig.into_script()?;

    let pubkey = hex::decode(GENESIS_PUBKEY_HEX)
        .map_err(|e| GenesisError::Decode(format!("genesis public key: {}", e)))?;
    let output = TxOutput::new(reward, Script::pay_to_pubkey(&pubkey)?);

    Ok(Transaction::coinbase(script_sig, output))
}

/// Everything fixed before the nonce search starts
#[derive(Debug, Clone)]
pub struct GenesisTemplate {
    pub params: GenesisParams,
    pub coinbase: Transaction,
    pub txid: Hash256,
    pub merkle_root: Hash256,
    /// Header with nonce 0
    pub header: BlockHeader,
}

impl GenesisTemplate {
    pub fn new(params: &GenesisParams) -> Result<Self> {
        let coinbase = build_coinbase(&params.message, params.reward)?;
        let txid = coinbase.txid()?;
        let merkle_root = compute_merkle_root(&[txid]);

        let header = BlockHeader::new(
            params.version,
            Hash256::zero(),
            merkle_root,
            params.timestamp,
            params.bits,
            0,
        );

        Ok(Self {
            params: params.clone(),
            coinbase,
            txid,
            merkle_root,
            header,
        })
    }

    pub fn header_with_nonce(&self, nonce: u32) -> BlockHeader {
        BlockHeader {
            nonce,
            ..self.header.clone()
        }
    }

    /// Search every nonce for a header hash below the target
    pub fn mine(
        &self,
        observer: &mut dyn SearchObserver,
        progress_interval: u64,
    ) -> Result<MinedGenesis> {
        log::info!("Coinbase TX hash: {}", self.txid);
        log::info!("Merkle root: {}", self.merkle_root);
        log::info!(
            "Mining with bits {} (difficulty {:.6})",
            CompactTarget::from_bits(self.params.bits),
            CompactTarget::from_bits(self.params.bits).difficulty()
        );

        let report = Searcher::new(&self.header)
            .progress_interval(progress_interval)
            .search(observer);

        match report.outcome {
            SearchOutcome::Found(solution) => {
                log::info!(
                    "Found nonce {} after {} attempts in {:.2?}",
                    solution.nonce,
                    report.attempts,
                    report.duration
                );
                Ok(MinedGenesis {
                    params: self.params.clone(),
                    txid: self.txid,
                    merkle_root: self.merkle_root,
                    nonce: solution.nonce,
                    hash: solution.hash,
                    attempts: report.attempts,
                    duration: report.duration,
                })
            }
            SearchOutcome::Exhausted => Err(GenesisError::NonceExhausted {
                timestamp: self.params.timestamp,
                attempts: report.attempts,
            }),
        }
    }
}

/// A solved genesis block
#[derive(Debug, Clone)]
pub struct MinedGenesis {
    pub params: GenesisParams,
    pub txid: Hash256,
    pub merkle_root: Hash256,
    pub nonce: u32,
    /// Header hash
    pub hash: Hash256,
    pub attempts: u64,
    pub duration: Duration,
}

impl MinedGenesis {
    pub fn hash_rate(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 { self.attempts as f64 / secs } else { 0.0 }
    }
}

/// Build the template for `params` and mine it
pub fn mine_genesis(
    params: &GenesisParams,
    observer: &mut dyn SearchObserver,
) -> Result<MinedGenesis> {
    GenesisTemplate::new(params)?.mine(observer, DEFAULT_PROGRESS_INTERVAL)
}
