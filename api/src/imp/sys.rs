use axerrno::{LinuxError, LinuxResult};
use minos_core::sched;
use minos_core::task::{current_process, exit_current};

/// Halt the machine. Only the init process may do this; any other caller
/// gets an error and keeps running. On success the calling process
/// terminates and the syscall does not return.
pub fn sys_halt() -> LinuxResult<isize> {
    let process = current_process();
    if !sched::is_init(process.get_pid()) {
        warn!(
            "[kernel] halt denied for pid {}, only init may halt",
            process.get_pid()
        );
        return Err(LinuxError::EPERM);
    }
    sched::mark_halted();
    exit_current(0)
}
