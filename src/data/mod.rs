//! Quest and item catalogs loaded from flat text files.

#![allow(unused_imports)]

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
