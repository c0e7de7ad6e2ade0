use super::RegularFile;
use crate::config;
use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_int;
use spin::Mutex;
use std::sync::Arc;

/// Anything a descriptor can be bound to: regular files and the console
/// devices.
pub trait FileLike: Send + Sync {
    fn read(&self, buf: &mut [u8]) -> LinuxResult<usize>;
    fn write(&self, buf: &[u8]) -> LinuxResult<usize>;
}

/// An open reference into the file table: a shared file plus a private
/// cursor. Two handles on the same file advance their cursors
/// independently.
pub struct FileHandle {
    file: Arc<RegularFile>,
    cursor: Mutex<usize>,
}

impl FileHandle {
    /// The caller must have taken an open reference on `file` already.
    pub(super) fn new(file: Arc<RegularFile>) -> Arc<Self> {
        Arc::new(Self {
            file,
            cursor: Mutex::new(0),
        })
    }

    pub fn file(&self) -> &Arc<RegularFile> {
        &self.file
    }
}

impl FileLike for FileHandle {
    fn read(&self, buf: &mut [u8]) -> LinuxResult<usize> {
        let mut cursor = self.cursor.lock();
        let n = self.file.read_at(*cursor, buf);
        *cursor += n;
        Ok(n)
    }

    fn write(&self, buf: &[u8]) -> LinuxResult<usize> {
        let mut cursor = self.cursor.lock();
        let n = self.file.write_at(*cursor, buf);
        *cursor += n;
        Ok(n)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.file.release();
    }
}

/// A per-process descriptor table. Slots 0 and 1 are bound to the console
/// at process creation; allocation always hands out the smallest free
/// slot above them.
pub struct FdTable {
    slots: Vec<Option<Arc<dyn FileLike>>>,
}

impl FdTable {
    /// An empty table with `limit` slots.
    pub fn new(limit: usize) -> Self {
        Self {
            slots: (0..limit).map(|_| None).collect(),
        }
    }

    /// The standard table a fresh process starts with: console input at
    /// [`config::FD_STDIN`], console output at [`config::FD_STDOUT`].
    pub fn with_console(limit: usize) -> Self {
        let mut table = Self::new(limit);
        table.slots[config::FD_STDIN] = Some(Arc::new(super::Stdin));
        table.slots[config::FD_STDOUT] = Some(Arc::new(super::Stdout));
        table
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Bind `file` to the smallest free descriptor.
    pub fn add(&mut self, file: Arc<dyn FileLike>) -> LinuxResult<usize> {
        let slot = self
            .slots
            .iter()
            .position(|slot| slot.is_none())
            .ok_or(LinuxError::EMFILE)?;
        self.slots[slot] = Some(file);
        Ok(slot)
    }

    pub fn get(&self, fd: c_int) -> LinuxResult<Arc<dyn FileLike>> {
        self.slot(fd)?.clone().ok_or(LinuxError::EBADF)
    }

    /// Unbind a descriptor and hand back its file reference; dropping the
    /// returned handle releases the file's open reference.
    pub fn remove(&mut self, fd: c_int) -> LinuxResult<Arc<dyn FileLike>> {
        let fd = fd as usize;
        if fd >= self.slots.len() {
            return Err(LinuxError::EBADF);
        }
        self.slots[fd].take().ok_or(LinuxError::EBADF)
    }

    /// Release every descriptor. Runs on every process exit path.
    pub fn close_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.take();
        }
    }

    fn slot(&self, fd: c_int) -> LinuxResult<&Option<Arc<dyn FileLike>>> {
        if fd < 0 || fd as usize >= self.slots.len() {
            return Err(LinuxError::EBADF);
        }
        Ok(&self.slots[fd as usize])
    }
}
