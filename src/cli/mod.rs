//! Command-line interface components
//!
//! This module contains CLI-specific code for the Hotel Ledger application,
//! including argument parsing, the interactive menu, input collection and
//! screen rendering.

pub mod args;
pub mod commands;
pub mod display;
pub mod input;
pub mod menu;

pub use args::{BookArgs, Cli, Commands, GlobalArgs, PeriodArgs};
pub use commands::{
    handle_availability, handle_book, handle_cancel, handle_find, handle_list, handle_stats,
};
pub use display::Presenter;
pub use input::{Prompter, parse_date};
pub use menu::run_menu;
