//! `versync_core` propagates a project's version number from its manifest
//! into a generated C header/source pair, so native builds can use the
//! version as compile-time constants.
//!
//! ## Pipeline
//!
//! ```text
//! versync.toml (optional)
//!   → manifest lookup (`tool.poetry.version` in `pyproject.toml` by default)
//!   → Version (major, minor, patch)
//!   → minijinja templates (header + source)
//!   → Inc/version.h, Src/version.c
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `versync.toml`: manifest path,
//!   version key, output paths and template overrides.
//! - [`manifest`] — Reading the version string out of a TOML manifest.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use versync_core::VersyncConfig;
//! use versync_core::check_generated_files;
//! use versync_core::generate;
//!
//! let root = Path::new(".");
//! let config = VersyncConfig::load_or_default(root).unwrap();
//!
//! let result = check_generated_files(root, &config).unwrap();
//! if !result.is_ok() {
//! 	generate(root, &config, &mut std::io::stdout()).unwrap();
//! }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use manifest::*;
pub use render::*;
pub use version::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod manifest;
mod render;
mod version;

#[cfg(test)]
mod __fixtures;
