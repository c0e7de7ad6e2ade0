mod ctl;
mod fd_ops;
mod fs;
mod io;

pub use ctl::*;
pub use fd_ops::*;
pub use fs::*;
pub use io::*;
