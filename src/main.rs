use card_gateway::application::gateway::PaymentGateway;
use card_gateway::config::{DEFAULT_BANK_URL, GatewayConfig};
use card_gateway::infrastructure::bank::HttpBank;
use card_gateway::infrastructure::cached::CachedPaymentStore;
use card_gateway::interfaces::http;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the payments HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8090")]
        bind: String,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
    /// Submit a JSON payment request file and print the outcome
    Submit {
        /// Payment request JSON file
        input: PathBuf,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
    /// Print a recorded payment outcome
    Recall {
        /// Payment id
        payment_id: String,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
}

#[derive(Args)]
struct GatewayArgs {
    /// Bank authorization endpoint
    #[arg(long, default_value = DEFAULT_BANK_URL)]
    bank_url: String,

    /// Timeout for a single bank call, in seconds
    #[arg(long, default_value_t = 10)]
    bank_timeout_secs: u64,

    /// Accepted currency code (repeatable). Defaults to USD, GBP and EUR.
    #[arg(long = "currency")]
    currencies: Vec<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

impl GatewayArgs {
    fn into_config(self) -> GatewayConfig {
        let config = GatewayConfig::default()
            .with_bank_url(self.bank_url)
            .with_bank_timeout(Duration::from_secs(self.bank_timeout_secs))
            .with_db_path(self.db_path);
        if self.currencies.is_empty() {
            config
        } else {
            config.with_currencies(self.currencies)
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
fn build_store(config: &GatewayConfig) -> Result<CachedPaymentStore> {
    use card_gateway::infrastructure::rocksdb::RocksDBStore;

    match &config.db_path {
        Some(path) => {
            let db = RocksDBStore::open(path).into_diagnostic()?;
            tracing::info!(path = %path.display(), "running in persistent storage mode");
            Ok(CachedPaymentStore::with_backend(Box::new(db)))
        }
        None => Ok(CachedPaymentStore::in_memory()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_store(config: &GatewayConfig) -> Result<CachedPaymentStore> {
    if config.db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    tracing::info!("no persistent storage, payments are kept for this session only");
    Ok(CachedPaymentStore::in_memory())
}

fn build_gateway(args: GatewayArgs) -> Result<PaymentGateway> {
    let config = args.into_config();
    let bank = HttpBank::from_config(&config).into_diagnostic()?;
    let store = build_store(&config)?;
    tracing::info!(
        bank_url = bank.url(),
        persistent = store.is_persistent(),
        "gateway configured"
    );
    Ok(PaymentGateway::new(&config, Box::new(bank), Box::new(store)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, gateway } => {
            let gateway = Arc::new(build_gateway(gateway)?);
            let app = http::router(gateway);

            let listener = tokio::net::TcpListener::bind(&bind).await.into_diagnostic()?;
            tracing::info!("listening on {}", bind);
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("interrupt received, shutting down");
                })
                .await
                .into_diagnostic()?;
        }
        Command::Submit { input, gateway } => {
            let gateway = build_gateway(gateway)?;
            let body = std::fs::read(&input).into_diagnostic()?;
            let outcome = gateway.submit_json(&body).await.into_diagnostic()?;
            println!("{}", serde_json::to_string(&outcome).into_diagnostic()?);
        }
        Command::Recall {
            payment_id,
            gateway,
        } => {
            let gateway = build_gateway(gateway)?;
            let outcome = gateway.recall(&payment_id).await.into_diagnostic()?;
            println!("{}", serde_json::to_string(&outcome).into_diagnostic()?);
        }
    }

    Ok(())
}
