//! The shared file table.
//!
//! File content lives in reference-counted [`RegularFile`] objects and is
//! shared, not copied: every descriptor bound to a file observes every
//! committed write immediately, across processes. `unlink` only removes
//! the name-to-file mapping for future opens; open descriptors keep full
//! access to the content until the last of them is closed.

mod console;
mod fd;

pub use console::{Stdin, Stdout};
pub use fd::{FdTable, FileHandle, FileLike};

use crate::config;
use axerrno::{LinuxError, LinuxResult};
use bitflags::bitflags;
use spin::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Create the file if the name is not mapped yet. Existing content
        /// is preserved and reopened.
        const CREATE = 1 << 0;
    }
}

/// A named byte file. Content is growable and guarded by a single lock,
/// so each read or write call is one atomic extend-or-overwrite.
pub struct RegularFile {
    name: String,
    content: Mutex<Vec<u8>>,
    open_refs: AtomicUsize,
    unlinked: AtomicBool,
}

impl RegularFile {
    fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            content: Mutex::new(Vec::new()),
            open_refs: AtomicUsize::new(0),
            unlinked: AtomicBool::new(false),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.content.lock().len()
    }

    pub fn open_refs(&self) -> usize {
        self.open_refs.load(Ordering::Acquire)
    }

    pub fn is_unlinked(&self) -> bool {
        self.unlinked.load(Ordering::Acquire)
    }

    /// Copy up to `buf.len()` bytes starting at `pos`. Returns the number
    /// of bytes copied; 0 signals end-of-content, never an error.
    pub fn read_at(&self, pos: usize, buf: &mut [u8]) -> usize {
        let content = self.content.lock();
        if pos >= content.len() {
            return 0;
        }
        let n = buf.len().min(content.len() - pos);
        buf[..n].copy_from_slice(&content[pos..pos + n]);
        n
    }

    /// Overwrite or append `data` at `pos`, growing the file when the
    /// write reaches past the current end. Returns the bytes written.
    pub fn write_at(&self, pos: usize, data: &[u8]) -> usize {
        let mut content = self.content.lock();
        let end = pos + data.len();
        if end > content.len() {
            content.resize(end, 0);
        }
        content[pos..end].copy_from_slice(data);
        data.len()
    }

    fn acquire(self: &Arc<Self>) {
        self.open_refs.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn release(&self) {
        let refs = self.open_refs.fetch_sub(1, Ordering::AcqRel);
        assert!(refs > 0, "[vfs] release of file {:?} without open reference", self.name);
        if refs == 1 && self.is_unlinked() {
            // the table mapping was removed at unlink; dropping the last
            // handle lets the storage go with it
            debug!("[vfs] reclaiming storage of unlinked file {:?}", self.name);
        }
    }
}

static FILE_TABLE: Mutex<BTreeMap<String, Arc<RegularFile>>> =
    Mutex::new(BTreeMap::new());

fn validate_name(name: &str) -> LinuxResult<&str> {
    if name.is_empty() {
        return Err(LinuxError::ENOENT);
    }
    if name.len() > config::MAX_NAME_LEN {
        return Err(LinuxError::ENAMETOOLONG);
    }
    Ok(name)
}

/// Resolve `name` in the file table and open a fresh descriptor handle on
/// it, with its cursor at offset 0. With [`OpenFlags::CREATE`] an unmapped
/// name creates a zero-length file first; an existing file is reopened
/// with its content preserved.
pub fn open_file(name: &str, flags: OpenFlags) -> LinuxResult<Arc<FileHandle>> {
    let name = validate_name(name)?;
    let mut table = FILE_TABLE.lock();
    let file = match table.get(name) {
        Some(file) => file.clone(),
        None if flags.contains(OpenFlags::CREATE) => {
            let file = RegularFile::new(name);
            table.insert(name.to_string(), file.clone());
            debug!("[vfs] created file {:?}", name);
            file
        }
        None => return Err(LinuxError::ENOENT),
    };
    file.acquire();
    Ok(FileHandle::new(file))
}

/// Remove the name-to-file mapping. Descriptors already open on the file
/// are untouched; a fresh open of the same name fails afterwards.
pub fn unlink_file(name: &str) -> LinuxResult<()> {
    let name = validate_name(name)?;
    let file = FILE_TABLE.lock().remove(name).ok_or(LinuxError::ENOENT)?;
    file.unlinked.store(true, Ordering::Release);
    debug!(
        "[vfs] unlinked {:?} ({} open references remain)",
        name,
        file.open_refs()
    );
    Ok(())
}

/// Install file content from the backing store. Used at boot to seed the
/// session with pre-existing files.
pub fn install(name: &str, content: &[u8]) -> LinuxResult<()> {
    let name = validate_name(name)?;
    let file = RegularFile::new(name);
    *file.content.lock() = content.to_vec();
    FILE_TABLE.lock().insert(name.to_string(), file);
    Ok(())
}

/// Snapshot a file's current content, bypassing the descriptor layer.
/// This is the backing-store view: unlinked files are not visible.
pub fn contents(name: &str) -> Option<Vec<u8>> {
    let table = FILE_TABLE.lock();
    table.get(name).map(|file| file.content.lock().clone())
}

/// Drop every name mapping, giving the next session a pristine store.
/// Open descriptors keep their files alive independently.
pub fn reset() {
    FILE_TABLE.lock().clear();
}
