use std::time::Duration;
use anyhow::{Context, Result};
use log::debug;
use shiplift::Docker;
use tokio::task::JoinHandle;
use crate::data::Connection;
use crate::resolve::IdentityMap;
use crate::source::{docker, lsns, netstat};

/// Everything gathered from the host in one run.
pub struct Snapshot {
    pub connections: Vec<Connection>,
    pub identities:  IdentityMap,
}

impl Snapshot {
    /// Any failing or timed out source aborts the whole capture.
    pub async fn capture(docker: &Docker, limit: Duration) -> Result<Self> {
        let namespaces = lsns::namespaces(limit).await.context("listing network namespaces")?;

        debug!("found {} network namespaces", namespaces.len());

        let tasks = namespaces.iter().map(|ns| {
            let (ns, pid) = (ns.ns, ns.pid);
            let task: JoinHandle<Result<Vec<Connection>>> = tokio::spawn(async move {
                let conns = netstat::connections(pid, limit).await.with_context(|| {
                    format!("reading connections of namespace {} (pid {})", ns, pid)
                })?;
                debug!("namespace {}: {} connections", ns, conns.len());
                Ok(conns)
            });
            task
        }).collect::<Vec<_>>();

        let mut connections = Vec::new();
        for task in tasks {
            connections.extend(task.await??);
        }

        let roots = docker::identities(docker, limit).await.context("reading container pids")?;

        Ok(Self {
            connections: connections,
            identities:  IdentityMap::new(roots),
        })
    }
}
