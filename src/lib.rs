//! Wildlife catalog explorer
//!
//! Tabular wildlife records are folded into a Status / Order / Family folder
//! tree that can be browsed one page of entries at a time.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
