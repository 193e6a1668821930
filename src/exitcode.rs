/// Standard Unix exit codes for the bookmarks-api binary.
///
/// These codes follow the BSD convention.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, bad configuration or a failed startup
pub const USAGE: i32 = 64;
