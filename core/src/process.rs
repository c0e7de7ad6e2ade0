use crate::config;
use crate::resource::ResourceLimits;
use crate::sync::WaitQueue;
use crate::vfs::FdTable;
use minos_process::{Pid, process::Process};
use spin::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Kernel-side state of a process that is not part of the PCB itself:
/// the command line, the descriptor table, resource limits, and the wait
/// channel its parent blocks on in `join`.
pub struct ProcessData {
    /// The command line: program name followed by the argument vector.
    pub command_line: Mutex<Vec<String>>,
    /// The per-process descriptor table.
    pub fd_table: Mutex<FdTable>,
    /// Per-process resource limits.
    pub resource_limits: Mutex<ResourceLimits>,
    /// Signaled exactly once, when this process exits.
    pub exit_wq: WaitQueue,
}

impl ProcessData {
    pub fn new(program: &str, args: &[String]) -> Arc<Self> {
        let mut command_line = vec![program.to_string()];
        command_line.extend(args.iter().cloned());
        let limits = ResourceLimits::new();
        let fd_limit = limits.get_soft(&crate::resource::ResourceLimitType::NOFILE) as usize;
        let fd_limit = fd_limit.min(config::MAX_OPEN_FILES);
        Arc::new(Self {
            command_line: Mutex::new(command_line),
            fd_table: Mutex::new(FdTable::with_console(fd_limit)),
            resource_limits: Mutex::new(limits),
            exit_wq: WaitQueue::new(),
        })
    }
}

static PROCESS_DATA: Mutex<BTreeMap<Pid, Arc<ProcessData>>> = Mutex::new(BTreeMap::new());

pub fn register_process_data(pid: Pid, data: Arc<ProcessData>) {
    PROCESS_DATA.lock().insert(pid, data);
}

pub fn get_process_data(pid: Pid) -> Option<Arc<ProcessData>> {
    PROCESS_DATA.lock().get(&pid).cloned()
}

pub(crate) fn remove_process_data(pid: Pid) {
    PROCESS_DATA.lock().remove(&pid);
}

/// Collect a zombie child on behalf of `parent`: the PCB is reclaimed and
/// the child's kernel data goes with it.
pub fn reap_process(parent: &Arc<Process>, child: &Arc<Process>) {
    parent.reap(child);
    remove_process_data(child.get_pid());
}
