//! Character classes, records, progression and persistence.

#![allow(unused_imports)]

pub mod class;
pub mod manager;
pub mod progression;
pub mod save;
pub mod types;

pub use class::*;
pub use manager::*;
pub use progression::*;
pub use save::*;
pub use types::*;
