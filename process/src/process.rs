use crate::Pid;
use alloc::collections::BTreeMap;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, AtomicU32, Ordering};
use spin::Mutex;

/// Lifecycle state of a process.
///
/// The only legal transitions are Running -> Zombie (at exit) and
/// Zombie -> Reaped (when the parent collects the exit status, or when an
/// orphaned zombie is reclaimed by the kernel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ProcessState {
    Running = 0,
    Zombie = 1,
    Reaped = 2,
}

pub struct Process {
    pid: Pid,
    parent: Mutex<Weak<Process>>,
    children: Mutex<BTreeMap<Pid, Arc<Process>>>,
    state: AtomicU8,
    exit_code: AtomicI32,
    aborted: AtomicBool,
}

impl Process {
    pub fn get_pid(&self) -> Pid {
        self.pid
    }

    pub fn get_parent(&self) -> Option<Arc<Process>> {
        self.parent.lock().upgrade()
    }

    pub fn get_children(&self) -> Vec<Arc<Process>> {
        self.children.lock().values().cloned().collect()
    }

    /// Look up a direct child that has not been reaped yet.
    pub fn get_child(&self, pid: Pid) -> Option<Arc<Process>> {
        self.children.lock().get(&pid).cloned()
    }

    pub fn get_state(&self) -> ProcessState {
        match self.state.load(Ordering::Acquire) {
            0 => ProcessState::Running,
            1 => ProcessState::Zombie,
            _ => ProcessState::Reaped,
        }
    }

    fn set_state(&self, state: ProcessState) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.get_state() == ProcessState::Running
    }

    pub fn is_zombie(&self) -> bool {
        self.get_state() == ProcessState::Zombie
    }

    pub fn is_reaped(&self) -> bool {
        self.get_state() == ProcessState::Reaped
    }

    /// Whether the process terminated abnormally instead of calling exit.
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    /// The recorded exit status. Only meaningful once the process has
    /// terminated.
    pub fn get_exit_code(&self) -> i32 {
        assert!(
            !self.is_running(),
            "[process] process {} has not terminated",
            self.pid
        );
        self.exit_code.load(Ordering::Relaxed)
    }

    /// only can be used in `create_process`
    /// does nothing but initialize fields
    fn new(pid: Pid, parent: Weak<Process>) -> Arc<Self> {
        Arc::new(Self {
            pid,
            parent: Mutex::new(parent),
            children: Mutex::new(BTreeMap::new()),
            state: AtomicU8::new(ProcessState::Running as u8),
            exit_code: AtomicI32::new(0),
            aborted: AtomicBool::new(false),
        })
    }

    /// Spawn the root process of a session. It has no parent; when it
    /// becomes a zombie it reclaims itself.
    pub fn spawn_init() -> Arc<Process> {
        create_process(generate_next_pid(), Weak::new())
    }

    /// Spawn a new child process linked to `self` as its parent.
    pub fn spawn_child(self: &Arc<Self>) -> Arc<Process> {
        create_process(generate_next_pid(), Arc::downgrade(self))
    }

    /// Terminate the process: record the exit status exactly once and move
    /// to the Zombie state.
    ///
    /// Still-running children are detached to the sentinel parent (they
    /// stay schedulable but can no longer be joined); children that are
    /// already zombies are reclaimed on the spot, since no process is left
    /// that could join them. A parentless zombie reclaims itself.
    ///
    /// Returns the pids removed from the process table, so the caller can
    /// drop any per-process state keyed by them.
    pub fn exit(self: &Arc<Self>, exit_code: i32, aborted: bool) -> Vec<Pid> {
        assert!(
            self.is_running(),
            "[process] process {} already terminated",
            self.pid
        );
        self.exit_code.store(exit_code, Ordering::Relaxed);
        self.aborted.store(aborted, Ordering::Relaxed);
        self.set_state(ProcessState::Zombie);

        let mut reclaimed = Vec::new();
        let children = {
            let mut children = self.children.lock();
            core::mem::take(&mut *children)
        };
        for (pid, child) in children {
            // decide each child's fate while holding its parent link: a
            // child exiting at this very moment either still sees the
            // link and leaves the zombie to us, or finds it cleared and
            // reclaims itself -- never neither
            let mut parent_link = child.parent.lock();
            if child.is_zombie() {
                child.set_state(ProcessState::Reaped);
                reclaimed.push(pid);
            } else {
                *parent_link = Weak::new();
            }
        }

        {
            let parent_link = self.parent.lock();
            if parent_link.upgrade().is_none() {
                self.set_state(ProcessState::Reaped);
                reclaimed.push(self.pid);
            }
        }

        let mut table = PROCESS_TABLE.lock();
        for pid in &reclaimed {
            table.remove(pid);
        }
        reclaimed
    }

    /// Collect a zombie child: remove it from this process's child set and
    /// from the process table. Exactly one reap per child can succeed,
    /// because the child is unlinked from the child set here and
    /// `get_child` fails afterwards.
    pub fn reap(self: &Arc<Self>, child: &Arc<Process>) {
        assert!(
            child.is_zombie(),
            "[process] process {} is not a zombie",
            child.pid
        );
        self.children.lock().remove(&child.pid);
        child.set_state(ProcessState::Reaped);
        PROCESS_TABLE.lock().remove(&child.pid);
        debug!("[process] process {} reaped child {}", self.pid, child.pid);
    }
}

static PROCESS_TABLE: Mutex<BTreeMap<Pid, Arc<Process>>> =
    Mutex::new(BTreeMap::<Pid, Arc<Process>>::new());

static NEXT_PID: AtomicU32 = AtomicU32::new(1);

fn generate_next_pid() -> Pid {
    NEXT_PID.fetch_add(1, Ordering::Acquire)
}

fn create_process(pid: Pid, parent: Weak<Process>) -> Arc<Process> {
    let process = Process::new(pid, parent.clone());
    if let Some(parent) = parent.upgrade() {
        parent.children.lock().insert(pid, process.clone());
    }
    let mut table = PROCESS_TABLE.lock();
    if table.insert(pid, process.clone()).is_some() {
        panic!("[process] process with id {} already exists", pid);
    }
    process
}

pub fn get_process(pid: Pid) -> Option<Arc<Process>> {
    PROCESS_TABLE.lock().get(&pid).cloned()
}

pub fn all_processes() -> Vec<Arc<Process>> {
    PROCESS_TABLE.lock().values().cloned().collect()
}
