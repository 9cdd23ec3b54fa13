//! Quest Chronicles - a turn-based text RPG library.
//!
//! The combat and progression core lives in [`combat`] and [`character`];
//! [`game`] ties a character to the loaded quest and item catalogs.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod data;
pub mod error;
pub mod game;
pub mod inventory;
pub mod quests;
pub mod simulator;
