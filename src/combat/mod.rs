//! Combatants, damage math, class abilities and the battle state machine.

#![allow(unused_imports)]

pub mod ability;
pub mod damage;
pub mod logic;
pub mod types;

pub use ability::*;
pub use damage::*;
pub use logic::*;
pub use types::*;
