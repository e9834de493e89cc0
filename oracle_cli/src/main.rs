use std::env;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use getopts::Options;

use oracle_core::config::OracleConfig;
use oracle_core::intro_history::SledIntroPersistence;
use oracle_core::narrative::{CallTone, NftHolding};
use oracle_core::oracle::OracleDependencies;
use oracle_core::WalletOracle;

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} -w WALLET [OPTIONS]", program);
    print!("{}", opts.usage(&brief));
    println!("\nEnvironment variables:");
    println!("  HELIUS_API_KEY     Helius key for live transaction history");
    println!("  QUICKNODE_API_KEY  QuickNode endpoint name, used when Helius fails");
    println!("  GROK_API_KEY       xAI key for narration and sentiment");
    println!("  OPENAI_API_KEY     OpenAI key, used for narration when Grok is not set");
    println!("  ROAST_LEVEL        mild | medium | fire (default fire)");
    println!("  INTRO_DB_PATH      sled directory for intro history (default oracle_db)");
}

/// `NAME#ID` or `NAME#ID@FLOOR`.
fn parse_nft(raw: &str) -> Option<NftHolding> {
    let (name, rest) = raw.split_once('#')?;
    let (id, floor) = match rest.split_once('@') {
        Some((id, floor)) => (id, floor.parse::<f64>().ok()),
        None => (rest, None),
    };

    Some(NftHolding {
        name: name.trim().to_string(),
        id: id.trim().to_string(),
        floor,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("w", "wallet", "Wallet address to analyze", "WALLET");
    opts.optopt("c", "config", "Load configuration from a RON file instead of the environment", "FILE");
    opts.optmulti("n", "nft", "NFT held by the wallet, as NAME#ID or NAME#ID@FLOOR", "NFT");
    opts.optopt("t", "tone", "Call tone for the exit line (bullish, bearish, questioning, heated, neutral)", "TONE");
    opts.optflag("h", "help", "Show this help message");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("Error parsing arguments: {}", f);
            print_usage(&program, opts);
            process::exit(1);
        }
    };

    if matches.opt_present("h") {
        print_usage(&program, opts);
        return Ok(());
    }

    let wallet = match matches.opt_str("w") {
        Some(wallet) => wallet,
        None => {
            eprintln!("Error: a wallet (-w) is required");
            print_usage(&program, opts);
            process::exit(1);
        }
    };

    let config = match matches.opt_str("c") {
        Some(path) => OracleConfig::from_ron_file(&path)?,
        None => OracleConfig::from_env(),
    };

    let nfts: Vec<NftHolding> = matches
        .opt_strs("n")
        .iter()
        .filter_map(|raw| {
            let nft = parse_nft(raw);
            if nft.is_none() {
                log::warn!("Ignoring malformed NFT argument: {}", raw);
            }
            nft
        })
        .collect();
    let tone = CallTone::from_label(&matches.opt_str("t").unwrap_or_default());

    let db = sled::open(&config.intro_db_path)
        .with_context(|| format!("Failed to open intro history database at {}", config.intro_db_path))?;
    let persistence = Arc::new(SledIntroPersistence::new(&db)?);
    let deps = OracleDependencies::from_config(&config, persistence);
    let oracle = WalletOracle::new(config, deps);

    let analysis = oracle.run(&wallet).await?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    let intro = oracle
        .generate_dynamic_intro(
            &wallet,
            &analysis.metrics,
            analysis.tier,
            (!nfts.is_empty()).then_some(nfts.as_slice()),
        )
        .await?;
    println!("\nINTRO: {}", intro);

    let call_id = format!("cli_{}", wallet);
    oracle.register_call_for_exit(&call_id, &wallet, analysis.tier)?;
    let exit = oracle.generate_dynamic_exit(&call_id, tone).await;
    println!("EXIT ({}): {}", tone, exit);

    println!("\n{}", serde_json::to_string_pretty(&oracle.get_status().await)?);

    db.flush()?;
    Ok(())
}
