//! Quest log: accepting, completing and tracking catalog quests.

#![allow(unused_imports)]

pub mod logic;

pub use logic::*;
