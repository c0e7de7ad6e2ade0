use crate::config;

pub const RLIMIT_INFINITY: u64 = u64::MAX;

/// The resource classes this kernel enforces limits on.
#[repr(usize)]
#[derive(Clone, Copy, Debug)]
pub enum ResourceLimitType {
    /// Concurrently live processes.
    NPROC = 0,
    /// Open descriptors per process.
    NOFILE = 1,
}

const RLIMIT_COUNT: usize = 2;

#[derive(Clone, Copy, Default, Debug)]
pub struct ResourceLimit {
    pub soft: u64,
    pub hard: u64,
}

impl ResourceLimit {
    pub fn new(soft: u64, hard: u64) -> Self {
        Self { soft, hard }
    }

    pub fn new_infinite() -> Self {
        Self {
            soft: RLIMIT_INFINITY,
            hard: RLIMIT_INFINITY,
        }
    }
}

pub struct ResourceLimits([ResourceLimit; RLIMIT_COUNT]);

impl ResourceLimits {
    pub fn new() -> Self {
        let mut limits = [ResourceLimit::new_infinite(); RLIMIT_COUNT];
        limits[ResourceLimitType::NPROC as usize] = ResourceLimit::new(
            config::MAX_PROCESSES as u64,
            config::MAX_PROCESSES as u64,
        );
        limits[ResourceLimitType::NOFILE as usize] = ResourceLimit::new(
            config::MAX_OPEN_FILES as u64,
            config::MAX_OPEN_FILES as u64,
        );
        Self(limits)
    }

    pub fn get_soft(&self, resource: &ResourceLimitType) -> u64 {
        self.0[*resource as usize].soft
    }

    pub fn get(&self, resource: &ResourceLimitType) -> ResourceLimit {
        self.0[*resource as usize]
    }

    pub fn set(&mut self, resource: &ResourceLimitType, limit: ResourceLimit) -> bool {
        if limit.soft > limit.hard {
            return false;
        }
        self.0[*resource as usize] = limit;
        true
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::new()
    }
}
