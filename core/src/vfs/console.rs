use super::FileLike;
use axerrno::{LinuxError, LinuxResult};
use std::io::{Read, Write};

/// Console input, bound to descriptor 0 of every process.
pub struct Stdin;

/// Console output, bound to descriptor 1 of every process. Writes are
/// unbuffered.
pub struct Stdout;

impl FileLike for Stdin {
    fn read(&self, buf: &mut [u8]) -> LinuxResult<usize> {
        std::io::stdin()
            .lock()
            .read(buf)
            .map_err(|_| LinuxError::EIO)
    }

    fn write(&self, _buf: &[u8]) -> LinuxResult<usize> {
        Err(LinuxError::EBADF)
    }
}

impl FileLike for Stdout {
    fn read(&self, _buf: &mut [u8]) -> LinuxResult<usize> {
        Err(LinuxError::EBADF)
    }

    fn write(&self, buf: &[u8]) -> LinuxResult<usize> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(buf).map_err(|_| LinuxError::EIO)?;
        stdout.flush().map_err(|_| LinuxError::EIO)?;
        Ok(buf.len())
    }
}
