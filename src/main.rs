use clap::Parser;
use tracing_subscriber::EnvFilter;

mod alignment;
mod cli;
mod core;
mod parsing;
mod pipeline;
mod resolve;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ancestral_allele=debug,info")
    } else {
        EnvFilter::new("ancestral_allele=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Infer(args) => {
            cli::infer::run(args, cli.format)?;
        }
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
