use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use swc_core::atoms::Atom;
use tracing::{error, instrument};

use crate::{
    finalize::{Bundle, finalize_bundle},
    parse::{SourceSyntax, parse},
    transforms::pure_decorators::{DEFAULT_HELPERS, relocate_decorators},
};

pub const PLUGIN_NAME: &str = "pure-decorators";

/// TypeScript files, including `<script lang="ts">` blocks of single file
/// components.
const DEFAULT_INCLUDE: &str = r"\.ts$|(\?|&)lang\.ts";

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Decorator helpers whose calls get relocated.
    pub helpers: Vec<String>,
    /// Pattern a file id has to match for the file to be transformed.
    pub include: String,
    pub syntax: SourceSyntax,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            helpers: DEFAULT_HELPERS.map(String::from).to_vec(),
            include: DEFAULT_INCLUDE.to_string(),
            syntax: SourceSyntax::default(),
        }
    }
}

/// When the host should run the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Apply {
    /// Production builds only.
    Build,
}

#[derive(Debug)]
pub struct Plugin {
    helpers: Vec<Atom>,
    include: Regex,
    syntax: SourceSyntax,
}

impl Plugin {
    pub fn new(config: Config) -> Result<Self> {
        let include = Regex::new(&config.include)
            .with_context(|| format!("invalid include pattern {:?}", config.include))?;
        Ok(Plugin {
            helpers: config.helpers.iter().map(|h| Atom::from(h.as_str())).collect(),
            include,
            syntax: config.syntax,
        })
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Pure blocks only pay off once a minifier runs.
    pub fn apply(&self) -> Apply {
        Apply::Build
    }

    pub fn is_eligible(&self, id: &str) -> bool {
        self.include.is_match(id)
    }

    /// Per-file hook. `None` means the file is left as it is, either because it
    /// is not eligible or because it could not be rewritten safely.
    #[instrument(level = "debug", skip_all, fields(id = %id))]
    pub fn transform(&self, code: &str, id: &str) -> Option<String> {
        if !self.is_eligible(id) {
            return None;
        }

        match self.try_transform(code, id) {
            Ok(output) => Some(output),
            Err(err) => {
                error!("failed to make decorators of {id} tree-shakable: {err:#}");
                None
            }
        }
    }

    fn try_transform(&self, code: &str, id: &str) -> Result<String> {
        let file = parse(code, id, self.syntax)?;
        relocate_decorators(code, &file, &self.helpers)
    }

    /// Bundle hook, run once every chunk has been rendered.
    pub fn generate_bundle(&self, bundle: &mut Bundle) {
        finalize_bundle(bundle);
    }
}
