//! CLI interaction module
//!
//! Provides `CliAdapter`, the terminal implementation of
//! `wt_core::InteractionAdapter`: fzf as the picker and dialoguer for
//! confirmations.

mod cli_adapter;

pub use cli_adapter::{CliAdapter, fzf_installed, spinner};
