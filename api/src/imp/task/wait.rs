use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_int;
use minos_core::process::{get_process_data, reap_process};
use minos_core::task::current_process;
use minos_process::Pid;

/// Block until the direct child `pid` has exited, then collect it.
///
/// Returns 1 with the child's status written through `exit_code`, or 0
/// for a child that terminated abnormally (it is reaped all the same, but
/// has no status to report). Fails without blocking when `pid` does not
/// name a live, un-reaped child of the caller; in particular a second
/// join on the same pid fails deterministically.
pub fn sys_join(pid: c_int, exit_code: &mut i32) -> LinuxResult<isize> {
    debug!("sys_join <= pid: {}", pid);
    if pid <= 0 {
        return Err(LinuxError::ECHILD);
    }
    let process = current_process();
    let child = process
        .get_child(pid as Pid)
        .ok_or(LinuxError::ECHILD)?;
    let child_data = get_process_data(child.get_pid()).ok_or(LinuxError::ECHILD)?;

    child_data.exit_wq.wait_until(|| child.is_zombie());
    reap_process(&process, &child);

    if child.is_aborted() {
        return Ok(0);
    }
    *exit_code = child.get_exit_code();
    Ok(1)
}
