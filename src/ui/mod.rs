//! Text menus for the interactive binary.

pub mod battle;
pub mod console;
pub mod menus;

pub use console::Console;
pub use menus::App;
