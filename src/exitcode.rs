//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination (also `--help`/`--version`)
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Order document content error (bad prices, cycles, ...)
pub const DATAERR: i32 = 65;

/// Order document missing
pub const NOINPUT: i32 = 66;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
