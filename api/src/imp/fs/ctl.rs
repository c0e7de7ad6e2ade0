use crate::syscall_instrument;
use axerrno::LinuxResult;
use macro_rules_attribute::apply;
use minos_core::vfs;

/// Remove the name-to-file mapping. Descriptors already open on the file
/// keep full access to its content; only future opens are affected.
#[apply(syscall_instrument)]
pub fn sys_unlink(name: &str) -> LinuxResult<isize> {
    debug!("sys_unlink <= name: {:?}", name);
    vfs::unlink_file(name)?;
    Ok(0)
}
