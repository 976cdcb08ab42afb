use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pure_decorators::{
    Plugin,
    finalize::{Bundle, OutputChunk, OutputFile},
};
use tracing::debug;

#[derive(Args)]
pub struct Finalize {
    /// Emitted chunks, rewritten in place.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

pub fn run(args: Finalize) -> Result<()> {
    let mut bundle = Bundle::default();
    let mut originals = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let file_name = path.to_string_lossy().into_owned();
        if bundle.contains_key(&file_name) {
            continue;
        }
        let code = fs::read_to_string(path)
            .with_context(|| format!("failed to read {file_name}"))?;
        originals.push(code.clone());
        bundle.insert(file_name, OutputFile::Chunk(OutputChunk { code }));
    }

    Plugin::new(Default::default())?.generate_bundle(&mut bundle);

    for ((file_name, output), original) in bundle.iter_mut().zip(originals) {
        let Some(code) = output.code_mut() else {
            continue;
        };
        if *code == original {
            debug!("{file_name} has no pure markers");
            continue;
        }
        fs::write(file_name, code.as_bytes())
            .with_context(|| format!("failed to write {file_name}"))?;
    }
    Ok(())
}
