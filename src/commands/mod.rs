pub mod check_drops;
pub mod compile;
pub mod input;

// Re-export all command functions
pub use check_drops::cmd_check_drops;
pub use compile::cmd_compile;
pub use input::TreeInput;
