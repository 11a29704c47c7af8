use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = artmart_worker::Args::parse();
	artmart_worker::run(args).await
}
