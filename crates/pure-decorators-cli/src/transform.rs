use std::{
    fs,
    io::{Write, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Args;
use pure_decorators::{Config, Plugin};
use tracing::info;

#[derive(Args)]
pub struct Transform {
    file: PathBuf,
    /// Module id matched against the `include` pattern. Defaults to the file
    /// path.
    #[arg(long)]
    id: Option<String>,
    /// JSON file with the plugin options.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the result. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: Transform) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };
    let plugin = Plugin::new(config)?;

    let code = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let id = args
        .id
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let output = match plugin.transform(&code, &id) {
        Some(output) => output,
        None => {
            info!("{id} left untouched");
            code
        }
    };

    match &args.output {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => stdout().lock().write_all(output.as_bytes())?,
    }
    Ok(())
}
