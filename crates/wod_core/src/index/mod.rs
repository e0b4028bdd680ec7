//! Scene index resolution from the local list and split files.

mod resolver;

pub use resolver::{resolve, resolve_from_split, ResolveError, ResolveResult};
