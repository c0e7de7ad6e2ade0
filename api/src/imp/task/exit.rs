use minos_core::task::{current_process, exit_current};

/// Terminate the calling process with `status`. Never returns: the
/// scheduler records the status, releases the descriptor table, wakes a
/// joining parent, and halts the system if this was the last live
/// process.
pub fn sys_exit(status: i32) -> ! {
    info!(
        "[task] process {} exit({})",
        current_process().get_pid(),
        status
    );
    exit_current(status)
}
