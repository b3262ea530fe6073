//! Process exit codes for the dispatch surface

/// Successful termination (includes completion listing)
pub const OK: i32 = 0;

/// No command given or unknown command; global help was printed
pub const NO_COMMAND: i32 = 1;

/// Command-specific help or usage error (binding failures included)
pub const COMMAND_USAGE: i32 = 2;

/// Internal software error (sysexits.h compatible)
pub const SOFTWARE: i32 = 70;
