use anyhow::Result;
use clap::Parser;
use vae_elbo::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vae_elbo=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
