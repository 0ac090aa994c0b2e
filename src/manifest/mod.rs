//! The requirement manifest.
//!
//! # Modules
//!
//! - [`requirement`] - A single parsed manifest line and its comparison key
//! - [`store`] - Ordered, deduplicated manifest and its file store
//! - [`generator`] - Manifest synthesis when the file is absent
//! - [`resolver`] - Rewriting entries to the versions actually installed

pub mod generator;
pub mod requirement;
pub mod resolver;
pub mod store;

pub use generator::{ManifestGenerator, PipreqsGenerator};
pub use requirement::{comparison_key, Requirement};
pub use resolver::{resolve, Resolution};
pub use store::{Manifest, ManifestStore};
