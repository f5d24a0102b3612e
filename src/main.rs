//! pump-launcher - create pump.fun tokens from the command line

use anyhow::{bail, Context, Result};
use clap::Parser;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::{fmt, EnvFilter};

use pump_launcher::adapters::cli::{CliApp, Command, CreateCmd, DeriveCmd, InspectCmd, StatusCmd};
use pump_launcher::adapters::pump_fun::BondingCurveBuyBuilder;
use pump_launcher::adapters::solana::{SolanaClient, WalletManager};
use pump_launcher::application::{CreateTokenParams, LaunchError, TokenLauncher};
use pump_launcher::config::{load_config, Config};
use pump_launcher::domain::known_programs::LAMPORTS_PER_SOL;
use pump_launcher::domain::pda::{associated_token_address, launch_addresses};
use pump_launcher::domain::{NetworkMode, WellKnownAddresses};
use pump_launcher::ports::SubmitError;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug, configured_log_level(&app.command))?;

    match app.command {
        Command::Create(cmd) => create_command(cmd).await,
        Command::Derive(cmd) => derive_command(cmd),
        Command::Status(cmd) => status_command(cmd).await,
        Command::Inspect(cmd) => inspect_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool, configured: Option<String>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else {
        EnvFilter::try_new(configured.unwrap_or_else(|| "warn".to_string()))
            .context("Invalid [logging] level")?
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

/// `[logging] level` from the command's config file, if it has one and it loads
fn configured_log_level(command: &Command) -> Option<String> {
    let path = match command {
        Command::Create(cmd) => &cmd.config,
        Command::Status(cmd) => &cmd.config,
        Command::Inspect(cmd) => &cmd.config,
        Command::Derive(_) => return None,
    };
    load_config(path).ok().map(|config| config.logging.level)
}

fn rpc_client(config: &Config, rpc_override: Option<&str>) -> Result<SolanaClient> {
    let rpc_url = rpc_override
        .map(str::to_string)
        .unwrap_or_else(|| config.solana.get_rpc_url());
    let commitment = config
        .solana
        .commitment_config()
        .context("Invalid [solana] commitment")?;
    Ok(SolanaClient::new(rpc_url, commitment))
}

async fn create_command(cmd: CreateCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;

    let mode = if cmd.devnet {
        NetworkMode::Devnet
    } else {
        config.network.mode
    };
    let solana = rpc_client(&config, cmd.rpc_url.as_deref())?;

    // Expand keypair path (handles ~ for home directory)
    let keypair_path = match &cmd.keypair {
        Some(path) => path.display().to_string(),
        None => config.solana.get_keypair_path(),
    };
    let keypair_path = shellexpand::tilde(&keypair_path).to_string();
    let wallet = load_wallet_with_context(&keypair_path)?;

    let mint = match &cmd.mint_keypair {
        Some(path) => {
            let path = shellexpand::tilde(&path.display().to_string()).to_string();
            WalletManager::from_file(&path)
                .with_context(|| format!("Failed to load mint keypair from '{}'", path))?
        }
        None => WalletManager::new_random(),
    };
    if let Some(path) = &cmd.save_mint {
        mint.save_to_file(path)
            .with_context(|| format!("Failed to save mint keypair to '{}'", path.display()))?;
        tracing::info!("Saved mint keypair to {}", path.display());
    }

    let slippage = cmd.slippage.unwrap_or(config.launch.default_slippage_percent);
    let params = CreateTokenParams::new(&cmd.name, &cmd.symbol, &cmd.uri).with_buy(cmd.buy_sol, slippage);

    let launch_config = config.launch_config().context("Invalid [launch] section")?;
    let launcher = TokenLauncher::new(solana, BondingCurveBuyBuilder::new())
        .with_network(mode)
        .with_config(launch_config);

    tracing::info!(
        "Launching {} ({}) on {} with mint {}",
        params.name,
        params.symbol,
        mode,
        mint.pubkey()
    );

    if cmd.dry_run {
        let prepared = launcher
            .build_signed_transaction(wallet.keypair(), mint.keypair(), &params)
            .await
            .context("Failed to build launch transaction")?;
        let bytes = bincode::serialize(&prepared.transaction).context("Failed to serialize transaction")?;

        println!("DRY RUN - transaction not submitted");
        println!("  Mint:          {}", prepared.mint);
        println!("  Bonding curve: {}", prepared.addresses.curve.bonding_curve);
        println!("  Metadata:      {}", prepared.addresses.metadata);
        println!("  Instructions:  {}", prepared.instruction_count);
        println!("  Priority fee:  {} micro-lamports/CU", prepared.priority_fee);
        println!("  Size:          {} bytes", bytes.len());
        println!("  Signature:     {}", prepared.transaction.signatures[0]);
        println!("  Transaction:   {}", bs58::encode(&bytes).into_string());
        return Ok(());
    }

    match launcher
        .create_token_with_receipt(wallet.keypair(), mint.keypair(), &params)
        .await
    {
        Ok(receipt) => {
            println!("✓ Token created");
            println!("  Mint:          {}", receipt.mint);
            println!("  Bonding curve: {}", receipt.addresses.curve.bonding_curve);
            println!("  Metadata:      {}", receipt.addresses.metadata);
            println!("  Priority fee:  {} micro-lamports/CU", receipt.priority_fee);
            println!("  Signature:     {}", receipt.signature);
            Ok(())
        }
        Err(e) if e.may_have_landed() => {
            bail!(
                "{}\n\nThe transaction may have been broadcast. Check the signature with\n  \
                 pump-launcher inspect <SIGNATURE>\nbefore launching again.",
                e
            )
        }
        Err(e @ LaunchError::Submission(SubmitError::Failed { .. })) => {
            bail!(
                "{}\n\nThe transaction landed but the program returned an error. No token was \
                 created and the network fee was charged.",
                e
            )
        }
        Err(e) => {
            let hint = if e.is_retryable() {
                "This looks like a network condition; retrying may succeed."
            } else {
                "Nothing was broadcast."
            };
            bail!("Launch failed at stage '{}': {}\n\n{}", e.stage(), e, hint)
        }
    }
}

fn derive_command(cmd: DeriveCmd) -> Result<()> {
    let mint = Pubkey::from_str(&cmd.mint).context("Invalid mint address")?;
    let addresses = WellKnownAddresses::for_mode(cmd.network);
    let derived = launch_addresses(&mint, &addresses.program_id)?;

    println!("Network:                  {}", cmd.network);
    println!("Mint:                     {}", mint);
    println!("Bonding curve:            {}", derived.curve.bonding_curve);
    println!("Associated bonding curve: {}", derived.curve.associated_bonding_curve);
    println!("Metadata:                 {}", derived.metadata);
    println!("Fee recipient:            {}", addresses.fee_recipient);

    if let Some(owner) = &cmd.owner {
        let owner = Pubkey::from_str(owner).context("Invalid owner address")?;
        println!("Owner token account:      {}", associated_token_address(&owner, &mint)?);
    }
    Ok(())
}

async fn status_command(cmd: StatusCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let solana = rpc_client(&config, None)?;

    let keypair_path = shellexpand::tilde(&config.solana.get_keypair_path()).to_string();
    let wallet = load_wallet_with_context(&keypair_path)?;

    let slot = solana.get_slot().await.context("RPC is not reachable")?;
    let balance = solana
        .get_balance(&wallet.pubkey().to_string())
        .await
        .context("Failed to get balance")?;

    println!("Network: {}", config.network.mode);
    println!("RPC:     {} (slot {})", solana.url(), slot);
    println!("Wallet:  {}", wallet.pubkey());
    println!(
        "Balance: {} lamports ({:.4} SOL)",
        balance,
        balance as f64 / LAMPORTS_PER_SOL as f64
    );

    Ok(())
}

async fn inspect_command(cmd: InspectCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let solana = rpc_client(&config, None)?;

    let tx = solana
        .get_transaction(&cmd.signature)
        .await
        .with_context(|| format!("Failed to fetch transaction {}", cmd.signature))?;
    println!("{}", tx);
    Ok(())
}

/// Load wallet with helpful error messages
fn load_wallet_with_context(keypair_path: &str) -> Result<WalletManager> {
    let path = Path::new(keypair_path);

    // Check if file exists first for a clearer error message
    if !path.exists() {
        bail!(
            "Wallet file not found: {}\n\n\
             A funded wallet is required to pay for the launch.\n\n\
             To create a new wallet, run:\n  \
             solana-keygen new --outfile {}\n\n\
             Or if you have an existing wallet, update 'keypair_path' in your config \
             or set SOLANA_KEYPAIR_PATH",
            keypair_path,
            keypair_path
        );
    }

    // Check if file is readable
    if let Err(e) = std::fs::metadata(path) {
        bail!(
            "Cannot access wallet file '{}': {}\n\n\
             Check file permissions and ensure the path is correct.",
            keypair_path,
            e
        );
    }

    WalletManager::from_file(keypair_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load wallet from '{}': {}\n\n\
             The file exists but may be corrupted or in the wrong format.\n\
             Expected format: JSON array of bytes (e.g., [1,2,3,...])",
            keypair_path,
            e
        )
    })
}
