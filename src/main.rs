#![doc = include_str!("../README.md")]

#[macro_use]
extern crate log;

use minos::{boot, syscall};

const WORKERS: i32 = 4;

/// Each worker writes one line into its own file and exits with its
/// worker number.
fn worker_main(args: &[String]) -> i32 {
    let id: i32 = args
        .first()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| syscall::exit(-1));

    let name = format!("worker-{}.log", id);
    let fd = syscall::creat(&name);
    if fd < 0 {
        syscall::exit(-1);
    }
    let line = format!("worker {} reporting\n", id);
    if syscall::write(fd, line.as_bytes(), line.len() as i32) != line.len() as i32 {
        syscall::exit(-1);
    }
    syscall::close(fd);
    id
}

fn init_main(_args: &[String]) -> i32 {
    let mut pids = Vec::new();
    for id in 0..WORKERS {
        let arg = id.to_string();
        let pid = syscall::exec("worker", 1, &[&arg]);
        if pid <= 0 {
            syscall::exit(-1);
        }
        pids.push((id, pid));
    }

    let mut failures = 0;
    for (id, pid) in pids {
        let mut status = 0;
        if syscall::join(pid, &mut status) != 1 || status != id {
            failures += 1;
            continue;
        }
        // read the worker's file back through a fresh descriptor
        let fd = syscall::open(&format!("worker-{}.log", id));
        let mut buf = [0u8; 64];
        let buf_len = buf.len() as i32;
        if fd < 0 || syscall::read(fd, &mut buf, buf_len) <= 0 {
            failures += 1;
        }
        syscall::close(fd);
    }

    let banner = format!("demo finished, {} failures\n", failures);
    syscall::write(1, banner.as_bytes(), banner.len() as i32);
    failures
}

fn main() {
    env_logger::init();

    boot::register_program("init", init_main);
    boot::register_program("worker", worker_main);

    match boot::run_init("init", &[]) {
        Ok(status) => {
            info!("[machine] init exited with status {}", status);
            std::process::exit(if status == 0 { 0 } else { 1 });
        }
        Err(err) => {
            error!("[machine] boot failed: {:?}", err);
            std::process::exit(1);
        }
    }
}
