// Console and JSON rendering of a genesis search

use serde::Serialize;

use crate::consensus::target::u256_to_hex;
use crate::consensus::{CompactTarget, Progress, SearchObserver};
use crate::core::Hash256;
use crate::genesis::{COIN, GenesisParams, GenesisTemplate, MinedGenesis};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Prints one progress line per callback
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl SearchObserver for ConsoleReporter {
    fn on_progress(&mut self, progress: &Progress) {
        println!("{}", render_progress(progress));
    }
}

pub fn render_progress(progress: &Progress) -> String {
    format!(
        "  Nonce: {} | Hashrate: {:.0} H/s | Time: {:.1}s",
        group_thousands(progress.attempts),
        progress.hash_rate(),
        progress.elapsed.as_secs_f64()
    )
}

/// Parameters and template hashes, printed before the search
pub fn render_template(template: &GenesisTemplate) -> String {
    let params = &template.params;
    format!(
        "{RULE}\nGenesis Block Miner\n{RULE}\n\n\
         Parameters:\n\
         \x20 Timestamp: {}\n\
         \x20 Message: {}\n\
         \x20 nBits: {}\n\
         \x20 Reward: {} coins\n\n\
         Coinbase TX Hash: {}\n\
         Merkle Root: {}\n\n\
         Target: {}\n",
        params.timestamp,
        params.message,
        CompactTarget::from_bits(params.bits),
        format_coins(params.reward),
        template.txid,
        template.merkle_root,
        u256_to_hex(&params.target()),
    )
}

/// Final report for a successful search
pub fn render_summary(mined: &MinedGenesis) -> String {
    format!(
        "{RULE}\nSUCCESS! Genesis block found!\n{RULE}\n\n\
         Coinbase TX Hash: {}\n\
         Nonce: {}\n\
         Hash: {}\n\
         Merkle Root: {}\n\
         Time elapsed: {:.2} seconds\n\
         Hashrate: {:.0} H/s\n",
        mined.txid,
        mined.nonce,
        mined.hash,
        mined.merkle_root,
        mined.duration.as_secs_f64(),
        mined.hash_rate(),
    )
}

/// Lines to paste into the node's chain parameters
pub fn render_chainparams(
    params: &GenesisParams,
    nonce: u32,
    hash: &Hash256,
    merkle_root: &Hash256,
) -> String {
    format!(
        "{THIN_RULE}\nC++ Code for chainparams.cpp:\n{THIN_RULE}\n\n\
         genesis = CreateGenesisBlock({}, {}, 0x{:08x}, {}, {});\n\
         consensus.hashGenesisBlock = genesis.GetHash();\n\
         assert(consensus.hashGenesisBlock == uint256S(\"0x{}\"));\n\
         assert(genesis.hashMerkleRoot == uint256S(\"0x{}\"));\n",
        params.timestamp,
        nonce,
        params.bits,
        params.version,
        reward_expression(params.reward),
        hash,
        merkle_root,
    )
}

/// Machine-readable form of a solved genesis block
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub params: &'a GenesisParams,
    pub coinbase_hash: Hash256,
    pub merkle_root: Hash256,
    pub nonce: u32,
    pub hash: Hash256,
    pub attempts: u64,
    pub elapsed_secs: f64,
    pub hash_rate: f64,
}

impl<'a> From<&'a MinedGenesis> for JsonReport<'a> {
    fn from(mined: &'a MinedGenesis) -> Self {
        Self {
            params: &mined.params,
            coinbase_hash: mined.txid,
            merkle_root: mined.merkle_root,
            nonce: mined.nonce,
            hash: mined.hash,
            attempts: mined.attempts,
            elapsed_secs: mined.duration.as_secs_f64(),
            hash_rate: mined.hash_rate(),
        }
    }
}

pub fn render_json(mined: &MinedGenesis) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::from(mined))
}

fn reward_expression(reward: u64) -> String {
    if reward % COIN == 0 {
        format!("{} * COIN", reward / COIN)
    } else {
        reward.to_string()
    }
}

fn format_coins(amount: u64) -> String {
    format!("{}.{:08}", amount / COIN, amount % COIN)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn mined() -> MinedGenesis {
        MinedGenesis {
            params: GenesisParams::default(),
            txid: Hash256::new([0x01; 32]),
            merkle_root: Hash256::new([0x01; 32]),
            nonce: 18201374,
            hash: Hash256::new([0x02; 32]),
            attempts: 18201375,
            duration: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(18201374), "18,201,374");
    }

    #[test]
    fn test_progress_line() {
        let line = render_progress(&Progress {
            nonce: 99_999,
            attempts: 100_000,
            elapsed: Duration::from_secs(2),
        });
        assert_eq!(line, "  Nonce: 100,000 | Hashrate: 50000 H/s | Time: 2.0s");
    }

    #[test]
    fn test_summary_fields() {
        let summary = render_summary(&mined());
        assert!(summary.contains("Nonce: 18201374"));
        assert!(summary.contains(&format!("Hash: {}", "02".repeat(32))));
        assert!(summary.contains(&format!("Merkle Root: {}", "01".repeat(32))));
        assert!(summary.contains("Time elapsed: 10.00 seconds"));
        assert!(summary.contains("Hashrate: 1820138 H/s"));
    }

    #[test]
    fn test_chainparams_snippet() {
        let m = mined();
        let snippet = render_chainparams(&m.params, m.nonce, &m.hash, &m.merkle_root);
        assert!(snippet.contains("CreateGenesisBlock(1732924800, 18201374, 0x1e00ffff, 1, 500 * COIN);"));
        assert!(snippet.contains(&format!("uint256S(\"0x{}\")", "02".repeat(32))));
    }

    #[test]
    fn test_reward_expression() {
        assert_eq!(reward_expression(500 * COIN), "500 * COIN");
        assert_eq!(reward_expression(COIN + 1), "100000001");
        assert_eq!(format_coins(500 * COIN), "500.00000000");
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&mined()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nonce"], 18201374);
        assert_eq!(value["params"]["bits"], 0x1e00ffffu32);
        assert_eq!(value["hash"], "02".repeat(32));
        assert_eq!(value["elapsed_secs"], 10.0);
    }

    #[test]
    fn test_template_render() {
        let template = GenesisTemplate::new(&GenesisParams::default()).unwrap();
        let text = render_template(&template);
        assert!(text.contains("nBits: 0x1e00ffff"));
        assert!(text.contains("Reward: 500.00000000 coins"));
        assert!(text.contains(&format!("Target: 000000ffff{}", "0".repeat(54))));
    }
}
