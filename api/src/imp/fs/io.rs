use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_int;
use minos_core::task::current_process_data;

/// Copy up to `count` bytes from the descriptor's cursor into `buf` and
/// advance the cursor by the bytes actually copied. Returns 0 at
/// end-of-content.
pub fn sys_read(fd: c_int, buf: &mut [u8], count: c_int) -> LinuxResult<isize> {
    debug!("sys_read <= fd: {}, count: {}", fd, count);
    let file = current_process_data().fd_table.lock().get(fd)?;
    if count < 0 {
        return Err(LinuxError::EINVAL);
    }
    let count = count as usize;
    if count > buf.len() {
        return Err(LinuxError::EFAULT);
    }
    let n = file.read(&mut buf[..count])?;
    Ok(n as isize)
}

/// Write up to `count` bytes from `buf` at the descriptor's cursor,
/// growing the file when the write reaches past its current end, and
/// advance the cursor. A write through a descriptor whose file has been
/// unlinked still succeeds; the open reference keeps the file alive.
pub fn sys_write(fd: c_int, buf: &[u8], count: c_int) -> LinuxResult<isize> {
    debug!("sys_write <= fd: {}, count: {}", fd, count);
    let file = current_process_data().fd_table.lock().get(fd)?;
    if count < 0 {
        return Err(LinuxError::EINVAL);
    }
    let count = count as usize;
    if count > buf.len() {
        return Err(LinuxError::EFAULT);
    }
    let n = file.write(&buf[..count])?;
    Ok(n as isize)
}
