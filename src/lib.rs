//! Compiles data-model change trees into ordered CQL alter scripts.

pub mod commands;
pub mod compile;
pub mod config;
pub mod constants;
pub mod render;
pub mod statement;
pub mod tree;
pub mod types;

pub use compile::{Compiler, ScriptContext, compile, has_destructive_statements};
pub use statement::{Statement, StatementKind, StatementLevel};
pub use types::UdtMap;
