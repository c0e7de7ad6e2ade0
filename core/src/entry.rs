use crate::process::{self, ProcessData};
use crate::{loader, sched, task};
use axerrno::LinuxResult;
use minos_process::process::Process;
use std::sync::{Mutex, PoisonError};

/// One session at a time; a second boot waits for the first to halt.
static SESSION: Mutex<()> = Mutex::new(());

/// Boot the kernel and run `name` as the init process.
///
/// Initializes the session registries, schedules init, and blocks until
/// the last live process has terminated. Returns init's recorded exit
/// status.
pub fn run_init(name: &str, args: &[String]) -> LinuxResult<i32> {
    let _session = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    task::install_panic_hook();

    let main = loader::load_program(name)?;
    let init = Process::spawn_init();
    let data = ProcessData::new(name, args);
    process::register_process_data(init.get_pid(), data.clone());
    sched::begin_session(init.get_pid());
    info!("[kernel] booting, init = {:?} (pid {})", name, init.get_pid());

    if let Err(err) = sched::spawn_user(init.clone(), data, main, args.to_vec()) {
        process::remove_process_data(init.get_pid());
        init.exit(crate::config::ABORT_EXIT_CODE, true);
        return Err(err);
    }

    sched::wait_halt();
    info!("[kernel] system halted");
    Ok(init.get_exit_code())
}
