// Integration tests for cqlmt

pub mod cli;
pub mod compile;
pub mod helpers;
