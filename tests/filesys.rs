//! File-system acceptance tests: descriptor semantics, shared content,
//! unlink behavior, and argument validation, driven end-to-end through
//! registered user programs.

use minos::{boot, syscall};

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --- unlink vs. open descriptors ---------------------------------------

fn unlink_main(_args: &[String]) -> i32 {
    let fd = syscall::creat("fs-output.txt");
    if fd < 2 {
        return 1;
    }
    // a second descriptor on the same file, opened before the unlink
    let reader = syscall::open("fs-output.txt");
    if reader < 2 || reader == fd {
        return 2;
    }

    let payload = b"twenty-four byte payload";
    let first = syscall::write(fd, payload, payload.len() as i32);
    if first != 24 {
        return 3;
    }

    if syscall::unlink("fs-output.txt") != 0 {
        return 4;
    }
    // the name is gone for future opens
    if syscall::open("fs-output.txt") != -1 {
        return 5;
    }
    // a second unlink of the same name fails
    if syscall::unlink("fs-output.txt") != -1 {
        return 6;
    }
    // the open descriptor keeps working, with the same byte count
    let second = syscall::write(fd, payload, payload.len() as i32);
    if second != first {
        return 7;
    }

    // both writes are visible through the descriptor opened earlier
    let mut buf = [0u8; 64];
    let buf_len = buf.len() as i32;
    let n = syscall::read(reader, &mut buf, buf_len);
    if n != 48 {
        return 8;
    }
    if &buf[..24] != payload || &buf[24..48] != payload {
        return 9;
    }

    syscall::close(fd);
    syscall::close(reader);
    0
}

#[test]
fn unlinked_file_lives_until_the_last_descriptor_closes() {
    setup();
    boot::register_program("unlink-main", unlink_main);
    assert_eq!(boot::run_init("unlink-main", &[]).unwrap(), 0);
    // the backing store no longer knows the name
    assert!(boot::contents("fs-output.txt").is_none());
}

// --- independent cursors -----------------------------------------------

fn cursor_main(_args: &[String]) -> i32 {
    let fd = syscall::creat("fs-cursor.txt");
    if fd < 2 {
        return 1;
    }
    let data = b"0123456789abcdefghij";
    if syscall::write(fd, data, data.len() as i32) != data.len() as i32 {
        return 2;
    }
    syscall::close(fd);

    let a = syscall::open("fs-cursor.txt");
    let b = syscall::open("fs-cursor.txt");
    if a < 2 || b < 2 {
        return 3;
    }

    let mut buf = [0u8; 10];
    if syscall::read(a, &mut buf, 10) != 10 || &buf != b"0123456789" {
        return 4;
    }
    // advancing a did not move b
    let mut small = [0u8; 4];
    if syscall::read(b, &mut small, 4) != 4 || &small != b"0123" {
        return 5;
    }
    // and a continues where it left off
    if syscall::read(a, &mut small, 4) != 4 || &small != b"abcd" {
        return 6;
    }

    // reading past end-of-content returns 0, not an error
    let mut rest = [0u8; 32];
    if syscall::read(a, &mut rest, 32) != 6 {
        return 7;
    }
    if syscall::read(a, &mut rest, 32) != 0 {
        return 8;
    }

    syscall::close(a);
    syscall::close(b);
    0
}

#[test]
fn descriptors_on_one_file_keep_private_cursors() {
    setup();
    boot::register_program("cursor-main", cursor_main);
    assert_eq!(boot::run_init("cursor-main", &[]).unwrap(), 0);
}

// --- name validation ---------------------------------------------------

fn names_main(_args: &[String]) -> i32 {
    let long = "fs-".to_string() + &"a".repeat(300);
    if syscall::open(&long) != -1 {
        return 1;
    }
    if syscall::creat(&long) != -1 {
        return 2;
    }
    if syscall::unlink(&long) != -1 {
        return 3;
    }
    // the failed creat left nothing behind
    if syscall::open(&long) != -1 {
        return 4;
    }
    if syscall::open("") != -1 {
        return 5;
    }
    // a missing (but well-formed) name is not an argument error, just absent
    if syscall::open("fs-never-created.txt") != -1 {
        return 6;
    }
    0
}

#[test]
fn oversized_names_are_rejected_without_side_effects() {
    setup();
    boot::register_program("names-main", names_main);
    assert_eq!(boot::run_init("names-main", &[]).unwrap(), 0);
}

// --- descriptor and count validation -----------------------------------

fn badfd_main(_args: &[String]) -> i32 {
    let mut buf = [0u8; 8];
    // descriptor numbers that were never opened
    if syscall::write(9, &buf, 4) != -1 {
        return 1;
    }
    if syscall::read(9, &mut buf, 4) != -1 {
        return 2;
    }
    if syscall::write(-1, &buf, 4) != -1 {
        return 3;
    }
    if syscall::read(99, &mut buf, 4) != -1 {
        return 4;
    }

    let fd = syscall::creat("fs-badfd.txt");
    if fd < 2 {
        return 5;
    }
    // a negative count is an error, never a silent no-op
    if syscall::read(fd, &mut buf, -5) != -1 {
        return 6;
    }
    if syscall::write(fd, &buf, -5) != -1 {
        return 7;
    }
    // a zero count is a no-op on a valid descriptor
    if syscall::write(fd, &buf, 0) != 0 {
        return 8;
    }

    if syscall::close(fd) != 0 {
        return 9;
    }
    // the slot is gone: IO and a second close both fail
    if syscall::write(fd, &buf, 4) != -1 {
        return 10;
    }
    if syscall::close(fd) != -1 {
        return 11;
    }
    0
}

#[test]
fn invalid_descriptors_and_counts_always_fail() {
    setup();
    boot::register_program("badfd-main", badfd_main);
    assert_eq!(boot::run_init("badfd-main", &[]).unwrap(), 0);
}

// --- console descriptors -----------------------------------------------

fn console_main(_args: &[String]) -> i32 {
    let line = b"console says hi\n";
    if syscall::write(1, line, line.len() as i32) != line.len() as i32 {
        return 1;
    }
    // the console handles are direction-bound
    if syscall::write(0, line, line.len() as i32) != -1 {
        return 2;
    }
    let mut buf = [0u8; 4];
    if syscall::read(1, &mut buf, 4) != -1 {
        return 3;
    }
    0
}

#[test]
fn console_descriptors_are_reserved_and_direction_bound() {
    setup();
    boot::register_program("console-main", console_main);
    assert_eq!(boot::run_init("console-main", &[]).unwrap(), 0);
}

// --- descriptor table exhaustion ---------------------------------------

fn exhaust_main(_args: &[String]) -> i32 {
    let fd = syscall::creat("fs-exhaust.txt");
    if fd != 2 {
        return 1;
    }
    syscall::close(fd);

    // 14 slots remain above the console descriptors
    let mut fds = Vec::new();
    for expected in 2..16 {
        let fd = syscall::open("fs-exhaust.txt");
        if fd != expected {
            return 2;
        }
        fds.push(fd);
    }
    // the table is full now
    if syscall::open("fs-exhaust.txt") != -1 {
        return 3;
    }
    // freeing the smallest slot makes it the next one handed out
    syscall::close(2);
    if syscall::open("fs-exhaust.txt") != 2 {
        return 4;
    }
    for fd in fds {
        syscall::close(fd);
    }
    0
}

#[test]
fn descriptor_table_exhaustion_fails_cleanly() {
    setup();
    boot::register_program("exhaust-main", exhaust_main);
    assert_eq!(boot::run_init("exhaust-main", &[]).unwrap(), 0);
}

// --- write atomicity under concurrency ----------------------------------

const CHUNK: usize = 64;
const ROUNDS: usize = 16;

fn atomic_writer(args: &[String]) -> i32 {
    let byte = match args.first().and_then(|arg| arg.bytes().next()) {
        Some(byte) => byte,
        None => syscall::exit(-1),
    };
    let fd = syscall::open("fs-atomic.txt");
    if fd < 2 {
        syscall::exit(-1);
    }
    let chunk = [byte; CHUNK];
    for _ in 0..ROUNDS {
        if syscall::write(fd, &chunk, CHUNK as i32) != CHUNK as i32 {
            syscall::exit(-1);
        }
    }
    syscall::close(fd);
    0
}

fn atomic_init(_args: &[String]) -> i32 {
    let fd = syscall::creat("fs-atomic.txt");
    if fd < 2 {
        return 1;
    }
    let a = syscall::exec("atomic-writer", 1, &["A"]);
    let b = syscall::exec("atomic-writer", 1, &["B"]);
    if a <= 0 || b <= 0 {
        return 2;
    }
    let mut status = -1;
    if syscall::join(a, &mut status) != 1 || status != 0 {
        return 3;
    }
    if syscall::join(b, &mut status) != 1 || status != 0 {
        return 4;
    }

    // both writers started at cursor 0, so the file is exactly one run
    // of chunks long; each chunk must be entirely one writer's bytes
    let mut buf = vec![0u8; 2 * CHUNK * ROUNDS];
    let buf_len = buf.len() as i32;
    let len = syscall::read(fd, &mut buf, buf_len);
    if len != (CHUNK * ROUNDS) as i32 {
        return 5;
    }
    for chunk in buf[..len as usize].chunks(CHUNK) {
        let first = chunk[0];
        if first != b'A' && first != b'B' {
            return 6;
        }
        if chunk.iter().any(|&byte| byte != first) {
            return 7;
        }
    }
    syscall::close(fd);
    0
}

#[test]
fn concurrent_writes_never_tear_a_chunk() {
    setup();
    boot::register_program("atomic-writer", atomic_writer);
    boot::register_program("atomic-init", atomic_init);
    assert_eq!(boot::run_init("atomic-init", &[]).unwrap(), 0);
}

// --- files seeded by the backing store ----------------------------------

fn preseed_main(_args: &[String]) -> i32 {
    let fd = syscall::open("fs-preseed.txt");
    if fd < 2 {
        return 1;
    }
    let mut buf = [0u8; 30];
    if syscall::read(fd, &mut buf, 30) != 30 {
        return 2;
    }
    if &buf != b"                ALICE'S ADVENT" {
        return 3;
    }
    // continue where the first read stopped
    let mut rest = [0u8; 10];
    if syscall::read(fd, &mut rest, 10) != 10 || &rest != b"URES IN WO" {
        return 4;
    }
    syscall::close(fd);
    0
}

#[test]
fn boot_seeded_files_are_readable() {
    setup();
    boot::install(
        "fs-preseed.txt",
        b"                ALICE'S ADVENTURES IN WONDERLAND",
    )
    .unwrap();
    boot::register_program("preseed-main", preseed_main);
    assert_eq!(boot::run_init("preseed-main", &[]).unwrap(), 0);
}

// --- shared content across processes -----------------------------------

fn shared_writer(args: &[String]) -> i32 {
    let fd = syscall::open("fs-shared.txt");
    if fd < 2 {
        syscall::exit(-1);
    }
    let line = match args.first() {
        Some(line) => line.as_bytes(),
        None => syscall::exit(-1),
    };
    if syscall::write(fd, line, line.len() as i32) != line.len() as i32 {
        syscall::exit(-1);
    }
    syscall::close(fd);
    0
}

fn shared_init(_args: &[String]) -> i32 {
    let fd = syscall::creat("fs-shared.txt");
    if fd < 2 {
        return 1;
    }
    // the child writes through its own descriptor into the same file
    let pid = syscall::exec("shared-writer", 1, &["from the child"]);
    if pid <= 0 {
        return 2;
    }
    let mut status = -1;
    if syscall::join(pid, &mut status) != 1 || status != 0 {
        return 3;
    }
    // the parent's descriptor sees the child's bytes
    let mut buf = [0u8; 32];
    let buf_len = buf.len() as i32;
    let n = syscall::read(fd, &mut buf, buf_len);
    if n != 14 || &buf[..14] != b"from the child" {
        return 4;
    }
    syscall::close(fd);
    0
}

#[test]
fn file_content_is_shared_across_processes() {
    setup();
    boot::register_program("shared-writer", shared_writer);
    boot::register_program("shared-init", shared_init);
    assert_eq!(boot::run_init("shared-init", &[]).unwrap(), 0);
    assert_eq!(
        boot::contents("fs-shared.txt").as_deref(),
        Some(b"from the child".as_slice())
    );
}
