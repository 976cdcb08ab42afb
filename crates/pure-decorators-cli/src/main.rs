mod finalize;
mod transform;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Makes classes decorated through `__decorate`-style helpers tree-shakable.
///
/// `transform` handles one module the way a bundler would hand it over,
/// `finalize` is run over the emitted chunks.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log every relocation decision. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relocates the decorator helper calls of a single module.
    Transform(transform::Transform),
    /// Turns the pure markers of emitted chunks into `/* @__PURE__ */`, in place.
    Finalize(finalize::Finalize),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Transform(args) => transform::run(args),
        Commands::Finalize(args) => finalize::run(args),
    }
}
