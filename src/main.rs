use chrono::NaiveDateTime;
use clap::Parser;
use loyalty_rewards::application::loader::DataLoader;
use loyalty_rewards::application::service::RewardService;
use loyalty_rewards::domain::ports::{ClockBox, TransactionStore, TransactionStoreBox};
use loyalty_rewards::infrastructure::clock::{FixedClock, SystemClock};
use loyalty_rewards::infrastructure::in_memory::InMemoryTransactionStore;
use loyalty_rewards::interfaces::csv::transaction_reader::TransactionReader;
use loyalty_rewards::interfaces::json::summary_writer::SummaryWriter;
use loyalty_rewards::interfaces::json::transaction_reader::read_transactions;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transactions file: a JSON array (.json) or CSV with header id,customer_id,amount,date
    input: PathBuf,

    /// Report a single customer instead of all of them
    #[arg(long)]
    customer: Option<String>,

    /// Instant treated as "now", e.g. 2024-03-25T12:00:00. Defaults to the local clock.
    #[arg(long)]
    as_of: Option<NaiveDateTime>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Log filter directive, e.g. "info" or "loyalty_rewards=debug". Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let store = open_store(cli.db_path)?;
    load_transactions(&cli.input, &*store).await?;

    let clock: ClockBox = match cli.as_of {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };
    let service = RewardService::new(store, clock);

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    match cli.customer {
        Some(customer_id) => {
            let summary = service.rewards_for_customer(&customer_id).await?;
            writer.write_summary(&summary)?;
        }
        None => {
            let summaries = service.rewards_for_all_customers().await?;
            writer.write_summaries(&summaries)?;
        }
    }

    Ok(())
}

fn setup_logging(directive: Option<&str>) -> Result<()> {
    // stdout carries the summaries, so logs go to stderr
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).into_diagnostic()?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let terminal_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(terminal_log)
        .init();
    Ok(())
}

fn open_store(db_path: Option<PathBuf>) -> Result<TransactionStoreBox> {
    #[cfg(feature = "storage-rocksdb")]
    {
        if let Some(db_path) = db_path {
            let store = loyalty_rewards::infrastructure::rocksdb::RocksDBStore::open(db_path)?;
            return Ok(Box::new(store));
        }
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        if db_path.is_some() {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
        }
    }

    Ok(Box::new(InMemoryTransactionStore::new()))
}

async fn load_transactions(input: &Path, store: &dyn TransactionStore) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let loader = DataLoader::new(store);

    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let transactions = read_transactions(file)?;
        loader.load(transactions.into_iter().map(Ok)).await?;
    } else {
        let reader = TransactionReader::new(file);
        loader.load(reader.transactions()).await?;
    }

    Ok(())
}
