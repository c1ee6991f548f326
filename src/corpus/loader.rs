//! @ai:module:intent TOML corpus loader for additional labeled tokens
//! @ai:module:layer infrastructure
//! @ai:module:public_api CorpusLoader, CorpusLoaderTrait
//! @ai:module:stateless true

use crate::corpus::token::TokenSample;
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading a token corpus
pub trait CorpusLoaderTrait: Send + Sync {
    /// @ai:intent Load all tokens from a corpus directory
    fn load_all(&self, corpus_dir: &Path) -> Result<Vec<TokenSample>>;

    /// @ai:intent Find a single token by symbol (case-insensitive)
    fn load_by_symbol(&self, corpus_dir: &Path, symbol: &str) -> Result<Option<TokenSample>>;
}

/// @ai:intent Raw corpus file: a list of `[[token]]` tables
#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default)]
    token: Vec<TokenSample>,
}

/// @ai:intent Loads labeled tokens from TOML files
pub struct CorpusLoader;

impl CorpusLoader {
    /// @ai:intent Create a new corpus loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse a single corpus file
    /// @ai:effects fs:read
    fn parse_corpus_file(path: &Path) -> Result<Vec<TokenSample>> {
        let content = std::fs::read_to_string(path)?;
        let file: CorpusFile = toml::from_str(&content)?;
        Ok(file.token)
    }

    /// @ai:effects fs:read
    fn find_corpus_files(corpus_dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(corpus_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "toml")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusLoaderTrait for CorpusLoader {
    /// @ai:intent Load all tokens, skipping files that fail to parse
    /// @ai:effects fs:read
    fn load_all(&self, corpus_dir: &Path) -> Result<Vec<TokenSample>> {
        let mut tokens = Vec::new();

        for path in Self::find_corpus_files(corpus_dir) {
            match Self::parse_corpus_file(&path) {
                Ok(parsed) => tokens.extend(parsed),
                Err(e) => {
                    tracing::warn!("Skipping invalid corpus file {}: {}", path.display(), e);
                }
            }
        }

        tokens.sort_by(|a, b| a.token_address.cmp(&b.token_address));
        tokens.dedup_by(|a, b| a.token_address == b.token_address);
        Ok(tokens)
    }

    /// @ai:intent Find a single token by symbol
    /// @ai:effects fs:read
    fn load_by_symbol(&self, corpus_dir: &Path, symbol: &str) -> Result<Option<TokenSample>> {
        let all_tokens = self.load_all(corpus_dir)?;
        Ok(all_tokens
            .into_iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol)))
    }
}
