use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod worker;

#[derive(Debug, Parser)]
#[command(
	version = artmart_cli::VERSION,
	rename_all = "kebab",
	styles = artmart_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = artmart_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = artmart_storage::db::Db::connect(&config.storage.postgres).await?;
	db.ensure_schema().await?;
	let es = artmart_storage::es::EsIndex::new(&config.storage.elasticsearch)?;

	worker::run_worker(worker::WorkerState { db, es }).await
}
