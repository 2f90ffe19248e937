pub mod cli;
pub mod tree;
