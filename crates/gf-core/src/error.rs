//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `GfError` as one variant
//! via `From`, so configuration failures surface unchanged at the top.

use thiserror::Error;

/// The top-level error type for `gf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum GfError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `gf-*` crates.
pub type GfResult<T> = Result<T, GfError>;
