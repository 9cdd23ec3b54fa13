//! A running game: the character plus the loaded catalogs.

#![allow(unused_imports)]

pub mod session;

pub use session::*;
