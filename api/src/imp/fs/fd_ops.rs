use crate::syscall_instrument;
use axerrno::LinuxResult;
use core::ffi::c_int;
use macro_rules_attribute::apply;
use minos_core::task::current_process_data;

/// Release the caller's descriptor. Dropping the last open reference to
/// an unlinked file reclaims its storage.
#[apply(syscall_instrument)]
pub fn sys_close(fd: c_int) -> LinuxResult<isize> {
    debug!("sys_close <= fd: {}", fd);
    let file = current_process_data().fd_table.lock().remove(fd)?;
    drop(file);
    Ok(0)
}
