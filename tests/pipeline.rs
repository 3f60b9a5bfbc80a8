// End-to-end checks of the genesis pipeline through the public API

use genesis_miner::consensus::{hash_to_u256, verify_header};
use genesis_miner::core::hash256;
use genesis_miner::{
    BlockHeader, GenesisError, GenesisParams, GenesisTemplate, Network, SearchOutcome, Searcher,
    Transaction, decode_compact, mine_genesis,
};

const MAIN_NONCE: u32 = 18201374;
const MAIN_HASH: &str = "000000f8fbca27c6b0401c11badfe6525ea6211aa929209cabde3aa4f7c28c12";
const TEST_NONCE: u32 = 725296;
const TEST_HASH: &str = "0000023ec7b5434923708046e5ac5c6c817ad1926646f7d03edcb506295a0267";
const MERKLE_ROOT: &str = "8e6192d4f0a7428cc73c0209232965c682ee56ab19d5aeca4b30e6a08f35a05d";

#[test]
fn mainnet_search_finds_known_nonce() {
    let template = GenesisTemplate::new(&GenesisParams::default()).unwrap();
    assert_eq!(template.merkle_root.to_hex(), MERKLE_ROOT);

    // no nonce in 18_200_000..18201374 qualifies, so the first hit is the known one
    let report = Searcher::new(&template.header).search_range(18_200_000..=u32::MAX, &mut ());
    let SearchOutcome::Found(solution) = report.outcome else {
        panic!("expected a solution");
    };

    assert_eq!(solution.nonce, MAIN_NONCE);
    assert_eq!(solution.hash.to_hex(), MAIN_HASH);
    assert_eq!(report.attempts, (MAIN_NONCE - 18_200_000) as u64 + 1);
    assert!(hash_to_u256(&solution.hash) < decode_compact(0x1e00ffff));
}

#[test]
fn testnet_search_finds_known_nonce() {
    let template = GenesisTemplate::new(&GenesisParams::for_network(Network::Test)).unwrap();
    let report = Searcher::new(&template.header).search_range(724_000..=u32::MAX, &mut ());
    let solution = report.solution().unwrap();
    assert_eq!(solution.nonce, TEST_NONCE);
    assert_eq!(solution.hash.to_hex(), TEST_HASH);
}

#[test]
fn pipeline_is_deterministic() {
    let params = GenesisParams {
        bits: 0x1f00ffff,
        ..GenesisParams::default()
    };
    let first = mine_genesis(&params, &mut ()).unwrap();
    let second = mine_genesis(&params, &mut ()).unwrap();

    assert_eq!(
        (first.nonce, first.hash, first.merkle_root),
        (second.nonce, second.hash, second.merkle_root)
    );
    assert_eq!(first.merkle_root.to_hex(), MERKLE_ROOT);
}

#[test]
fn merkle_root_is_coinbase_hash() {
    let template = GenesisTemplate::new(&GenesisParams::default()).unwrap();
    let coinbase_bytes = template.coinbase.serialize().unwrap();
    assert_eq!(template.merkle_root, hash256(&coinbase_bytes));
    assert_eq!(template.header.merkle_root, template.merkle_root);
    assert!(template.header.prev_block_hash.is_zero());
}

#[test]
fn genesis_artifacts_roundtrip() {
    let template = GenesisTemplate::new(&GenesisParams::default()).unwrap();

    let header = template.header_with_nonce(MAIN_NONCE);
    let bytes = header.serialize();
    assert_eq!(bytes.len(), 80);
    assert_eq!(BlockHeader::deserialize(&bytes).unwrap(), header);

    let tx_bytes = template.coinbase.serialize().unwrap();
    assert_eq!(Transaction::deserialize(&tx_bytes).unwrap(), template.coinbase);
}

#[test]
fn parameter_changes_change_the_artifact() {
    let base = GenesisTemplate::new(&GenesisParams::default()).unwrap();

    let other_message = GenesisTemplate::new(&GenesisParams {
        message: "another chain".to_string(),
        ..GenesisParams::default()
    })
    .unwrap();
    assert_ne!(other_message.merkle_root, base.merkle_root);

    let other_reward = GenesisTemplate::new(&GenesisParams {
        reward: 50 * 100_000_000,
        ..GenesisParams::default()
    })
    .unwrap();
    assert_ne!(other_reward.merkle_root, base.merkle_root);

    // timestamp only moves the header, not the coinbase
    let other_time = GenesisTemplate::new(&GenesisParams {
        timestamp: 1732924801,
        ..GenesisParams::default()
    })
    .unwrap();
    assert_eq!(other_time.merkle_root, base.merkle_root);
    assert!(!verify_header(&other_time.header_with_nonce(MAIN_NONCE)));
}

#[test]
fn zero_target_reports_exhaustion() {
    let params = GenesisParams {
        bits: 0x00000000,
        ..GenesisParams::default()
    };
    let err = mine_genesis(&params, &mut ()).unwrap_err();
    assert!(matches!(err, GenesisError::NonceExhausted { .. }));
    assert!(err.to_string().contains("different timestamp"));
}

#[test]
fn oversized_message_is_rejected_at_construction() {
    let params = GenesisParams {
        message: "m".repeat(256),
        ..GenesisParams::default()
    };
    assert!(matches!(
        GenesisTemplate::new(&params),
        Err(GenesisError::MessageTooLong { len: 256 })
    ));
}
