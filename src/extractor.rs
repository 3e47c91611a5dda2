//! Extraction entry points: the plain functions and the caching [`Extractor`].
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::cache::ParseCache;
use crate::comments::{associate, CommentsMap, LineIndex, VisitedPool};
use crate::error::ExtractError;
use crate::input::{read_source, Input};
use crate::options::ExtractOptions;
use crate::parser::parse_go;
use crate::parser::syntax::SyntaxFile;

/// Extract comments with default options, without caching.
pub fn extract(input: &Input) -> Result<CommentsMap, ExtractError> {
    extract_with(input, &ExtractOptions::default())
}

/// Extract comments with explicit options, without caching.
pub fn extract_with(input: &Input, options: &ExtractOptions) -> Result<CommentsMap, ExtractError> {
    let file_id = input.file_id(&options.literal_name);
    match input {
        Input::File(path) => extract_source(&read_source(path)?, &file_id, options),
        Input::Literal(source) => extract_source(source, &file_id, options),
    }
}

/// Extract comments from source text under the given file identifier.
pub fn extract_source(
    source: &str,
    file_id: &str,
    options: &ExtractOptions,
) -> Result<CommentsMap, ExtractError> {
    let syntax = parse_go(source, file_id)?;
    let lines = LineIndex::build(source, &syntax.comments);
    let mut visited = vec![false; lines.line_count() + 1];
    Ok(associate(&syntax, &lines, file_id, options, &mut visited))
}

/// Extraction with a parse cache and pooled visited buffers.
///
/// Safe to share between threads. Output is identical to [`extract_with`]
/// for the same options and input.
#[derive(Debug, Default)]
pub struct Extractor {
    options: ExtractOptions,
    cache: ParseCache,
    pool: VisitedPool,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            cache: ParseCache::new(),
            pool: VisitedPool::new(),
        }
    }

    /// Process-wide extractor with default options.
    pub fn shared() -> &'static Extractor {
        static SHARED: OnceLock<Extractor> = OnceLock::new();
        SHARED.get_or_init(Extractor::default)
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }

    pub fn pool(&self) -> &VisitedPool {
        &self.pool
    }

    pub fn extract(&self, input: &Input) -> Result<CommentsMap, ExtractError> {
        let start = Instant::now();
        let file_id = input.file_id(&self.options.literal_name);
        let map = match input {
            Input::File(path) => self.extract_file(path, &file_id)?,
            Input::Literal(source) => {
                let syntax = parse_go(source, &file_id)?;
                self.associate(source, &syntax, &file_id)
            }
        };
        debug!(
            file = %file_id,
            anchors = map.len(),
            comments = map.comment_count(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "extracted comments"
        );
        Ok(map)
    }

    /// Run [`Extractor::extract`] over many inputs in parallel.
    ///
    /// Results are in input order.
    pub fn extract_all(&self, inputs: &[Input]) -> Vec<Result<CommentsMap, ExtractError>> {
        inputs.par_iter().map(|input| self.extract(input)).collect()
    }

    fn extract_file(&self, path: &Path, file_id: &str) -> Result<CommentsMap, ExtractError> {
        let source = read_source(path)?;
        let syntax = self.cache.get_or_parse(path, &source, file_id)?;
        Ok(self.associate(&source, &syntax, file_id))
    }

    fn associate(&self, source: &str, syntax: &SyntaxFile, file_id: &str) -> CommentsMap {
        let lines = LineIndex::build(source, &syntax.comments);
        let mut visited = self.pool.acquire(lines.line_count() + 1);
        associate(syntax, &lines, file_id, &self.options, &mut visited)
    }
}
