//! Filesystem layer for Asset Mirror
//!
//! Provides lexical path normalization, relative-path keys used to join the
//! input and output trees, and the recursive tree walker consumed by the
//! diff engine.

pub mod error;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use path::{normalize, relative_key};
pub use walk::walk;
