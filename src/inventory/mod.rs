//! Inventory, equipment slots and the shop.

#![allow(unused_imports)]

pub mod logic;

pub use logic::*;
