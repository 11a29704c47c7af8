use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = artmart_api::Args::parse();
	artmart_api::run(args).await
}
