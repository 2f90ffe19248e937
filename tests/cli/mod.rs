/// CLI integration tests running the actual binary with assert_cmd
pub mod check_drops;
pub mod compile;
pub mod error_handling;
