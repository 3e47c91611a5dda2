//! Associate Go comments with the source lines they document.
//!
//! An extraction parses one Go file (or a source literal), attaches every
//! comment to at most one anchor line and returns a [`CommentsMap`] keyed by
//! `"<file>:<line>"`. Declarations claim their doc blocks and trailing
//! comments first; every other syntax node then claims what is left on its
//! own line or the line directly above.
//!
//! ```no_run
//! use getcomments::{extract, Input};
//!
//! let map = extract(&Input::detect("main.go"))?;
//! for (line, comments) in map.iter() {
//!     println!("{}: {comments:?}", map.key(line));
//! }
//! # Ok::<(), getcomments::ExtractError>(())
//! ```

pub mod cache;
pub mod comments;
pub mod discover;
pub mod error;
pub mod extractor;
pub mod input;
pub mod options;
pub mod parser;

pub use cache::{CacheStats, ParseCache};
pub use comments::CommentsMap;
pub use discover::discover_go_files;
pub use error::ExtractError;
pub use extractor::{extract, extract_source, extract_with, Extractor};
pub use input::Input;
pub use options::{ExtractOptions, Lookback};
