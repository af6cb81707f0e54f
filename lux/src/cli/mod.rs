pub mod app;
pub mod commands;
pub mod console;
pub mod display;

pub use app::{Cli, Commands};
pub use console::Console;
