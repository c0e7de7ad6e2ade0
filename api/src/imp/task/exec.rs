use axerrno::{LinuxError, LinuxResult};
use core::ffi::c_int;
use minos_core::config;
use minos_core::loader::load_program;
use minos_core::process::{ProcessData, reap_process, register_process_data};
use minos_core::resource::ResourceLimitType;
use minos_core::sched;
use minos_core::task::{current_process, current_process_data};

/// Create a child process running `program` with the given argument
/// vector and schedule it. Returns the child's pid.
///
/// All validation happens before the child PCB exists, so a failed exec
/// never leaks partially-allocated state.
pub fn sys_exec(program: &str, argc: c_int, argv: &[&str]) -> LinuxResult<isize> {
    debug!("sys_exec <= program: {:?}, argc: {}", program, argc);
    if argc < 0 || argc as usize != argv.len() {
        return Err(LinuxError::EINVAL);
    }
    if program.is_empty() {
        return Err(LinuxError::ENOENT);
    }
    if program.len() > config::MAX_NAME_LEN {
        return Err(LinuxError::ENAMETOOLONG);
    }
    let main = load_program(program)?;

    let parent = current_process();
    let limit = current_process_data()
        .resource_limits
        .lock()
        .get_soft(&ResourceLimitType::NPROC);
    if sched::live_processes() as u64 >= limit {
        return Err(LinuxError::EAGAIN);
    }

    let args: Vec<String> = argv.iter().map(|arg| arg.to_string()).collect();
    let child = parent.spawn_child();
    let data = ProcessData::new(program, &args);
    register_process_data(child.get_pid(), data.clone());

    if let Err(err) = sched::spawn_user(child.clone(), data, main, args) {
        // the stillborn child never ran; retire it on the spot
        child.exit(config::ABORT_EXIT_CODE, true);
        reap_process(&parent, &child);
        return Err(err);
    }
    info!(
        "[task] process {} exec {:?} -> pid {}",
        parent.get_pid(),
        program,
        child.get_pid()
    );
    Ok(child.get_pid() as isize)
}
