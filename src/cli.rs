// CLI commands

use clap::{Args, Parser, Subcommand};

use crate::consensus::pow::DEFAULT_PROGRESS_INTERVAL;
use crate::consensus::{CompactTarget, verify_header};
use crate::error::{GenesisError, Result};
use crate::genesis::{GenesisParams, GenesisTemplate, Network};
use crate::report::{self, ConsoleReporter};

#[derive(Parser, Debug)]
#[command(name = "genesis-miner")]
#[command(about = "Build and mine the genesis block of a chain", long_about = None)]
pub struct Cli {
    /// Defaults to `mine` with the built-in parameters
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a genesis nonce
    Mine(MineArgs),

    /// Check a known nonce against the target
    Verify {
        /// Nonce to check
        #[arg(long)]
        nonce: u32,

        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Overrides for the genesis parameters
#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    /// Preset selecting the difficulty bits
    #[arg(long, value_enum)]
    pub network: Option<Network>,

    /// Block timestamp (Unix seconds)
    #[arg(long)]
    pub timestamp: Option<u32>,

    /// Message embedded in the coinbase script
    #[arg(long)]
    pub message: Option<String>,

    /// Compact difficulty bits in hex, e.g. 0x1e00ffff; overrides --network
    #[arg(long, value_parser = parse_bits)]
    pub bits: Option<u32>,

    /// Block version
    #[arg(long)]
    pub block_version: Option<u32>,

    /// Coinbase reward in base units
    #[arg(long)]
    pub reward: Option<u64>,
}

impl ParamArgs {
    pub fn to_params(&self) -> GenesisParams {
        let defaults = GenesisParams::for_network(self.network.unwrap_or_default());
        GenesisParams {
            timestamp: self.timestamp.unwrap_or(defaults.timestamp),
            message: self.message.clone().unwrap_or(defaults.message),
            bits: self.bits.unwrap_or(defaults.bits),
            version: self.block_version.unwrap_or(defaults.version),
            reward: self.reward.unwrap_or(defaults.reward),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MineArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Nonces between progress lines (0 disables them)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for MineArgs {
    fn default() -> Self {
        Self {
            params: ParamArgs::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            json: false,
        }
    }
}

/// Parse hex bits with or without a 0x prefix
pub fn parse_bits(value: &str) -> std::result::Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid bits '{}': {}", value, e))
}

/// Handle CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_else(|| Commands::Mine(MineArgs::default())) {
        Commands::Mine(args) => mine(&args),
        Commands::Verify { nonce, params } => verify(nonce, &params.to_params()),
    }
}

fn mine(args: &MineArgs) -> Result<()> {
    let params = args.params.to_params();
    let template = GenesisTemplate::new(&params)?;

    if args.json {
        let mined = template.mine(&mut (), args.progress_interval)?;
        println!("{}", report::render_json(&mined)?);
        return Ok(());
    }

    println!("{}", report::render_template(&template));
    println!("Mining genesis block...");

    let mined = template.mine(&mut ConsoleReporter, args.progress_interval)?;

    println!();
    println!("{}", report::render_summary(&mined));
    println!(
        "{}",
        report::render_chainparams(&params, mined.nonce, &mined.hash, &mined.merkle_root)
    );

    Ok(())
}

fn verify(nonce: u32, params: &GenesisParams) -> Result<()> {
    let template = GenesisTemplate::new(params)?;
    let header = template.header_with_nonce(nonce);
    let hash = header.hash();

    println!("Coinbase TX Hash: {}", template.txid);
    println!("Merkle Root: {}", template.merkle_root);
    println!("Nonce: {}", nonce);
    println!("Hash: {}", hash);

    if !verify_header(&header) {
        return Err(GenesisError::ProofOfWorkNotMet {
            nonce,
            bits: params.bits,
        });
    }

    log::info!(
        "Nonce {} satisfies bits {}",
        nonce,
        CompactTarget::from_bits(params.bits)
    );
    println!("✓ Proof of work satisfied");
    println!();
    println!(
        "{}",
        report::render_chainparams(params, nonce, &hash, &template.merkle_root)
    );

    Ok(())
}
