//! Process lifecycle primitives: identity, the parent/child tree, and the
//! global process table. A process moves through a strict state machine
//! (Running -> Zombie -> Reaped); no transition skips a state.
#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod process;

/// Type alias for process IDs. IDs are assigned from a monotonically
/// increasing counter and are never reused within a session.
pub type Pid = u32;
