// Configuration file name
pub const CONFIG_FILENAME: &str = "cqlmt.yaml";

// Tree argument that reads from standard input
pub const STDIN_PATH: &str = "-";

// First database version that supports the full alter dialect
pub const LEGACY_DB_VERSION_CEILING: &str = "3.0.11";
