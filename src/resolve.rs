use std::collections::HashMap;
use std::iter::FromIterator;
use std::sync::Arc;
use libc::pid_t;
use log::trace;
use parking_lot::RwLock;
use crate::data::{Connection, ContainerIdentity, Record};
use crate::proc::ProcessTable;

/// Longest parent chain followed before a PID is given up on.
pub const MAX_DEPTH: usize = 512;

/// Container root PIDs, plus every descendant PID resolved so far.
#[derive(Debug, Default)]
pub struct IdentityMap {
    table: RwLock<HashMap<pid_t, Arc<ContainerIdentity>>>,
}

impl IdentityMap {
    pub fn new(roots: HashMap<pid_t, ContainerIdentity>) -> Self {
        roots.into_iter().collect()
    }

    pub fn get(&self, pid: pid_t) -> Option<Arc<ContainerIdentity>> {
        self.table.read().get(&pid).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    // entries already present are kept
    fn fill(&self, pids: &[pid_t], identity: &Arc<ContainerIdentity>) {
        let mut table = self.table.write();
        for pid in pids {
            table.entry(*pid).or_insert_with(|| identity.clone());
        }
    }
}

impl FromIterator<(pid_t, ContainerIdentity)> for IdentityMap {
    fn from_iter<I: IntoIterator<Item = (pid_t, ContainerIdentity)>>(iter: I) -> Self {
        let table = iter.into_iter().map(|(pid, identity)| {
            (pid, Arc::new(identity))
        }).collect::<HashMap<_, _>>();
        Self { table: RwLock::new(table) }
    }
}

pub struct Resolver<P> {
    map:   IdentityMap,
    procs: P,
}

impl<P: ProcessTable> Resolver<P> {
    pub fn new(map: IdentityMap, procs: P) -> Self {
        Self { map, procs }
    }

    pub fn map(&self) -> &IdentityMap {
        &self.map
    }

    /// Find the container owning `pid` by walking up its parents until a
    /// known PID is hit. Every PID passed on the way is remembered.
    pub fn resolve(&self, pid: pid_t) -> Option<Arc<ContainerIdentity>> {
        let mut pid     = pid;
        let mut pending = Vec::new();

        while pid > 0 && pending.len() < MAX_DEPTH {
            if let Some(identity) = self.map.get(pid) {
                if !pending.is_empty() {
                    trace!("pid {} resolved via ancestor {}", pending[0], pid);
                    self.map.fill(&pending, &identity);
                }
                return Some(identity);
            }

            pending.push(pid);
            pid = self.procs.parent_of(pid)?;
        }

        if pending.len() >= MAX_DEPTH {
            trace!("pid {} exceeds max ancestry depth", pending[0]);
        }

        None
    }

    pub fn resolve_all(&self, connections: Vec<Connection>) -> Vec<Record> {
        connections.into_iter().map(|connection| {
            let container = self.resolve(connection.pid).unwrap_or_default();
            Record { container, connection }
        }).collect()
    }
}
