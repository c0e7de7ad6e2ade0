//! The scheduler: one host thread per process, a live-process counter,
//! and the halt protocol.
//!
//! Fairness among runnable processes is delegated to the host's thread
//! scheduler; this module owns everything the kernel itself must track:
//! who is alive, when the last process goes away, and the teardown that
//! every termination path runs.

use crate::config;
use crate::loader::ProgramMain;
use crate::process::{self, ProcessData};
use crate::sync::WaitQueue;
use crate::task::{self, ProcessExit};
use axerrno::{LinuxError, LinuxResult};
use minos_process::{Pid, process::Process};
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread::JoinHandle;

static LIVE_PROCESSES: AtomicUsize = AtomicUsize::new(0);
static HALTED: AtomicBool = AtomicBool::new(false);
static INIT_PID: AtomicU32 = AtomicU32::new(0);
static HALT_WQ: WaitQueue = WaitQueue::new();
static WORKERS: Mutex<Vec<JoinHandle<()>>> = Mutex::new(Vec::new());

/// Number of processes that have been scheduled and not yet terminated.
pub fn live_processes() -> usize {
    LIVE_PROCESSES.load(Ordering::Acquire)
}

/// Whether the calling session's init process has this pid.
pub fn is_init(pid: Pid) -> bool {
    INIT_PID.load(Ordering::Acquire) == pid
}

pub fn machine_halted() -> bool {
    HALTED.load(Ordering::Acquire)
}

pub fn mark_halted() {
    info!("[sched] machine halt requested");
    HALTED.store(true, Ordering::Release);
}

pub(crate) fn begin_session(init_pid: Pid) {
    assert_eq!(
        live_processes(),
        0,
        "[sched] session started while processes are live"
    );
    HALTED.store(false, Ordering::Release);
    INIT_PID.store(init_pid, Ordering::Release);
}

/// Schedule `main` as the program of `process` on a fresh thread.
///
/// The live counter is bumped before the thread exists so the halt
/// condition can never observe a scheduled-but-uncounted process.
pub fn spawn_user(
    process: std::sync::Arc<Process>,
    data: std::sync::Arc<ProcessData>,
    main: ProgramMain,
    args: Vec<String>,
) -> LinuxResult<()> {
    let pid = process.get_pid();
    LIVE_PROCESSES.fetch_add(1, Ordering::AcqRel);
    let spawned = std::thread::Builder::new()
        .name(format!("pid-{pid}"))
        .spawn(move || {
            task::set_current(process, data);
            debug!("[sched] process {} running", pid);
            let result = std::panic::catch_unwind(AssertUnwindSafe(|| main(&args)));
            let (status, aborted) = match result {
                Ok(status) => (status, false),
                Err(payload) => match payload.downcast::<ProcessExit>() {
                    Ok(exit) => (exit.status, false),
                    Err(_) => (config::ABORT_EXIT_CODE, true),
                },
            };
            finish_current(status, aborted);
        });
    match spawned {
        Ok(handle) => {
            WORKERS
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(handle);
            Ok(())
        }
        Err(err) => {
            LIVE_PROCESSES.fetch_sub(1, Ordering::AcqRel);
            warn!("[sched] could not spawn thread for pid {}: {}", pid, err);
            Err(LinuxError::EAGAIN)
        }
    }
}

/// The single termination path. Releases the descriptor table, performs
/// the Zombie transition, wakes a joining parent, and drops the process
/// from the live count; the whole system halts when the count reaches
/// zero.
fn finish_current(status: i32, aborted: bool) {
    let (process, data) = task::take_current();
    let pid = process.get_pid();
    if aborted {
        warn!("[sched] process {} aborted, status {}", pid, status);
    } else {
        info!("[sched] process {} exited with status {}", pid, status);
    }

    data.fd_table.lock().close_all();
    let reclaimed = process.exit(status, aborted);
    for pid in reclaimed {
        process::remove_process_data(pid);
    }
    data.exit_wq.notify_all();

    let remaining = LIVE_PROCESSES.fetch_sub(1, Ordering::AcqRel) - 1;
    if remaining == 0 {
        info!("[sched] last process terminated, halting");
        HALT_WQ.notify_all();
    }
}

/// Block until every live process has terminated, then join the worker
/// threads of the session.
pub(crate) fn wait_halt() {
    HALT_WQ.wait_until(|| live_processes() == 0);
    let workers = {
        let mut workers = WORKERS.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *workers)
    };
    for worker in workers {
        let _ = worker.join();
    }
}
