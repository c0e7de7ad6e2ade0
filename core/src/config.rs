//! Compile-time kernel parameters.

/// Size of a per-process descriptor table, including the two reserved
/// console descriptors.
pub const MAX_OPEN_FILES: usize = 16;

/// Descriptor number bound to console input at process creation.
pub const FD_STDIN: usize = 0;

/// Descriptor number bound to console output at process creation.
pub const FD_STDOUT: usize = 1;

/// Longest accepted file or program name, in bytes. Longer names are
/// rejected at the syscall boundary, never truncated.
pub const MAX_NAME_LEN: usize = 255;

/// Upper bound on concurrently live processes.
pub const MAX_PROCESSES: usize = 128;

/// Exit status recorded for a process that terminates abnormally.
pub const ABORT_EXIT_CODE: i32 = -1;
