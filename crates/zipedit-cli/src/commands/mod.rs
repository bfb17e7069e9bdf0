//! Subcommand implementations.

pub mod completion;
pub mod create;
pub mod demo;
pub mod edit;
pub mod extract;
pub mod generate;
pub mod list;
pub mod replace;
