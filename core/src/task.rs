//! Current-process tracking and the exit path.
//!
//! Every user process runs on its own host thread; the thread knows which
//! process it is through a thread-local slot installed by the scheduler.

use crate::process::ProcessData;
use minos_process::process::Process;
use spin::Once;
use std::cell::RefCell;
use std::sync::Arc;

struct Current {
    process: Arc<Process>,
    data: Arc<ProcessData>,
}

std::thread_local! {
    static CURRENT: RefCell<Option<Current>> = const { RefCell::new(None) };
}

pub fn current_process() -> Arc<Process> {
    CURRENT.with(|current| {
        current
            .borrow()
            .as_ref()
            .map(|current| current.process.clone())
            .expect("[task] no current process on this thread")
    })
}

pub fn current_process_data() -> Arc<ProcessData> {
    CURRENT.with(|current| {
        current
            .borrow()
            .as_ref()
            .map(|current| current.data.clone())
            .expect("[task] no current process on this thread")
    })
}

pub(crate) fn set_current(process: Arc<Process>, data: Arc<ProcessData>) {
    CURRENT.with(|current| {
        let mut current = current.borrow_mut();
        assert!(
            current.is_none(),
            "[task] thread already runs process {}",
            current.as_ref().unwrap().process.get_pid()
        );
        *current = Some(Current { process, data });
    });
}

pub(crate) fn take_current() -> (Arc<Process>, Arc<ProcessData>) {
    CURRENT.with(|current| {
        let current = current
            .borrow_mut()
            .take()
            .expect("[task] no current process on this thread");
        (current.process, current.data)
    })
}

/// The unwind payload carrying an explicit exit status out of a user
/// program. Converted back into a normal termination by the scheduler.
pub struct ProcessExit {
    pub status: i32,
}

/// Terminate the calling process with `status`. Does not return; the
/// scheduler takes over and performs the Zombie transition.
pub fn exit_current(status: i32) -> ! {
    std::panic::panic_any(ProcessExit { status })
}

static PANIC_HOOK: Once = Once::new();

/// Keep explicit process exits out of the panic output; real panics
/// (abnormal termination) still reach the default hook.
pub(crate) fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if info.payload().downcast_ref::<ProcessExit>().is_some() {
                return;
            }
            default_hook(info);
        }));
    });
}
