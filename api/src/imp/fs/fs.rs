use crate::syscall_instrument;
use axerrno::LinuxResult;
use macro_rules_attribute::apply;
use minos_core::task::current_process_data;
use minos_core::vfs::{self, OpenFlags};

/// Open an existing file and bind it to the smallest free descriptor of
/// the calling process. The new descriptor's cursor starts at offset 0,
/// independent of any other descriptor on the same file.
#[apply(syscall_instrument)]
pub fn sys_open(name: &str) -> LinuxResult<isize> {
    debug!("sys_open <= name: {:?}", name);
    let file = vfs::open_file(name, OpenFlags::empty())?;
    let fd = current_process_data().fd_table.lock().add(file)?;
    Ok(fd as isize)
}

/// Like [`sys_open`], but an unmapped name creates a zero-length file
/// first. An existing file is reopened with its content preserved.
#[apply(syscall_instrument)]
pub fn sys_creat(name: &str) -> LinuxResult<isize> {
    debug!("sys_creat <= name: {:?}", name);
    let file = vfs::open_file(name, OpenFlags::CREATE)?;
    let fd = current_process_data().fd_table.lock().add(file)?;
    Ok(fd as isize)
}
