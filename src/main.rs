use anyhow::Result;
use clap::Parser as _;

use docs_chrome_replay::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    docs_chrome_replay::run(args).await
}
