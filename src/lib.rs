//! A small teaching kernel that runs on the host: multiprogramming with
//! bounded concurrent processes, parent/child synchronization, and a
//! shared virtual file system accessed through per-process descriptor
//! tables.
//!
//! User programs are host functions registered with [`boot::register_program`]
//! and started with [`boot::run_init`]; inside a program, the [`syscall`]
//! module is the complete user/kernel boundary.

#[macro_use]
extern crate log;

pub mod syscall;

/// The host-facing machine surface: program registration, backing-store
/// seeding, and the boot entry point.
pub mod boot {
    pub use minos_core::entry::run_init;
    pub use minos_core::loader::register_program;
    pub use minos_core::vfs::{contents, install, reset};
}
