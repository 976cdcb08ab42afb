//! Bundle-level rewrite of the internal pure marker.
//!
//! The marker survives bundling as a regular comment. Only once the bundle is
//! complete is it turned into the annotation minifiers recognize.

use std::{borrow::Cow, sync::LazyLock};

use indexmap::IndexMap;
use regex::{NoExpand, Regex};
use tracing::trace;

/// Annotation recognized by terser, esbuild, rollup and swc.
pub const PURE_ANNOTATION: &str = "/* @__PURE__ */ ";

static PURE_MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*\*!PURE\*/\s*").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    pub source: Vec<u8>,
}

/// One emitted artifact. Only chunks carry code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFile {
    Chunk(OutputChunk),
    Asset(OutputAsset),
}

impl OutputFile {
    pub fn code_mut(&mut self) -> Option<&mut String> {
        match self {
            OutputFile::Chunk(chunk) => Some(&mut chunk.code),
            OutputFile::Asset(_) => None,
        }
    }
}

/// Emitted artifacts keyed by file name.
pub type Bundle = IndexMap<String, OutputFile>;

/// Replaces every marker, along with the whitespace that follows it.
pub fn finalize_code(code: &str) -> Cow<'_, str> {
    PURE_MARKER_PATTERN.replace_all(code, NoExpand(PURE_ANNOTATION))
}

pub fn finalize_bundle(bundle: &mut Bundle) {
    for (file_name, output) in bundle.iter_mut() {
        let Some(code) = output.code_mut() else {
            continue;
        };
        let finalized = match finalize_code(code) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(finalized) => finalized,
        };
        trace!(file_name = file_name.as_str(), "annotated pure blocks");
        *code = finalized;
    }
}
