mod exec;
mod exit;
mod wait;

pub use exec::*;
pub use exit::*;
pub use wait::*;
