//! The program loader seam.
//!
//! Executable images are host functions registered under a name before
//! boot; `exec` resolves through this registry. A program's return value
//! is its implicit exit status.

use axerrno::{LinuxError, LinuxResult};
use spin::Mutex;
use std::collections::BTreeMap;

/// Entry point of a user program. Receives the argument vector passed to
/// `exec`.
pub type ProgramMain = fn(&[String]) -> i32;

static PROGRAMS: Mutex<BTreeMap<String, ProgramMain>> = Mutex::new(BTreeMap::new());

/// Make a program image available to `exec`. Registering a name twice
/// replaces the previous image.
pub fn register_program(name: &str, main: ProgramMain) {
    PROGRAMS.lock().insert(name.to_string(), main);
}

pub fn load_program(name: &str) -> LinuxResult<ProgramMain> {
    PROGRAMS
        .lock()
        .get(name)
        .copied()
        .ok_or(LinuxError::ENOENT)
}
