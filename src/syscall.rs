//! The user/kernel boundary.
//!
//! Each function forwards to its `sys_*` implementation and flattens the
//! kernel's error taxonomy into the integer contract user programs see:
//! `-1` for the file calls, a non-positive pid for a failed `exec`, and
//! anything other than 1 for a failed `join`. The cause stays visible in
//! the logs.

use axerrno::LinuxResult;
use minos_api::imp::fs::{sys_close, sys_creat, sys_open, sys_read, sys_unlink, sys_write};
use minos_api::imp::sys::sys_halt;
use minos_api::imp::task::{sys_exec, sys_exit, sys_join};

fn flatten(result: LinuxResult<isize>) -> i32 {
    match result {
        Ok(value) => value as i32,
        Err(err) => {
            debug!("[syscall] failed: {:?}", err);
            -1
        }
    }
}

/// Create a child process running `program` and schedule it. Returns the
/// child's pid (> 0), or a non-positive value if the image cannot be
/// loaded, the argument vector is malformed, or resources are exhausted.
pub fn exec(program: &str, argc: i32, argv: &[&str]) -> i32 {
    flatten(sys_exec(program, argc, argv))
}

/// Wait for the direct child `pid` to exit and collect its status.
/// Returns 1 on success, 0 for a child that terminated abnormally, and
/// -1 (without blocking) when `pid` is not a live, un-reaped child of the
/// caller.
pub fn join(pid: i32, status: &mut i32) -> i32 {
    flatten(sys_join(pid, status))
}

/// Terminate the calling process with `status`. Does not return.
pub fn exit(status: i32) -> ! {
    sys_exit(status)
}

/// Halt the machine. Init only; any other caller gets -1 back.
pub fn halt() -> i32 {
    flatten(sys_halt())
}

/// Create (or reopen) `name` and return a fresh descriptor, or -1.
pub fn creat(name: &str) -> i32 {
    flatten(sys_creat(name))
}

/// Open `name` and return a fresh descriptor, or -1.
pub fn open(name: &str) -> i32 {
    flatten(sys_open(name))
}

/// Read up to `count` bytes into `buf`. Returns the bytes read, 0 at
/// end-of-content, or -1.
pub fn read(fd: i32, buf: &mut [u8], count: i32) -> i32 {
    flatten(sys_read(fd, buf, count))
}

/// Write up to `count` bytes from `buf`. Returns the bytes written or -1.
pub fn write(fd: i32, buf: &[u8], count: i32) -> i32 {
    flatten(sys_write(fd, buf, count))
}

/// Release the descriptor. Returns 0 or -1.
pub fn close(fd: i32) -> i32 {
    flatten(sys_close(fd))
}

/// Remove the name-to-file mapping. Returns 0 or -1.
pub fn unlink(name: &str) -> i32 {
    flatten(sys_unlink(name))
}
