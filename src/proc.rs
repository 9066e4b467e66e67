use std::collections::HashMap;
use libc::pid_t;

/// Read access to the parent links of the host process tree.
pub trait ProcessTable {
    /// Parent of `pid`, or `None` if the process is gone or unreadable.
    fn parent_of(&self, pid: pid_t) -> Option<pid_t>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcFs;

impl ProcessTable for ProcFs {
    fn parent_of(&self, pid: pid_t) -> Option<pid_t> {
        let proc   = procfs::process::Process::new(pid).ok()?;
        let status = proc.status().ok()?;
        Some(status.ppid)
    }
}

impl ProcessTable for HashMap<pid_t, pid_t> {
    fn parent_of(&self, pid: pid_t) -> Option<pid_t> {
        self.get(&pid).copied()
    }
}

pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procfs_parent_of_self() {
        let pid  = std::process::id() as pid_t;
        let ppid = unsafe { libc::getppid() };
        assert_eq!(ProcFs.parent_of(pid), Some(ppid));
    }

    #[test]
    fn procfs_missing_process() {
        assert_eq!(ProcFs.parent_of(pid_t::MAX), None);
    }

    #[test]
    fn map_parent_of() {
        let table = vec![(100, 42), (42, 1)].into_iter().collect::<HashMap<_, _>>();
        assert_eq!(table.parent_of(100), Some(42));
        assert_eq!(table.parent_of(7), None);
    }
}
