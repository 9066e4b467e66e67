use std::collections::HashMap;
use std::convert::TryFrom;
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use libc::pid_t;
use log::debug;
use shiplift::{ContainerListOptions, Docker};
use tokio::time::timeout;
use crate::data::ContainerIdentity;

pub const POD_NAMESPACE:  &str = "io.kubernetes.pod.namespace";
pub const POD_NAME:       &str = "io.kubernetes.pod.name";
pub const CONTAINER_NAME: &str = "io.kubernetes.container.name";

/// Root PID of every running container, mapped to its Kubernetes labels.
/// Containers that disappear before they can be inspected are left out.
pub async fn identities(docker: &Docker, limit: Duration) -> Result<HashMap<pid_t, ContainerIdentity>> {
    let containers = docker.containers();
    let options    = ContainerListOptions::default();

    let list = timeout(limit, containers.list(&options)).await
        .map_err(|_| anyhow!("docker container list timed out after {:?}", limit))?
        .context("docker container list failed")?;

    let mut roots = HashMap::with_capacity(list.len());

    for c in list {
        let container = containers.get(c.id.as_str());
        let details   = match timeout(limit, container.inspect()).await {
            Ok(Ok(details)) => details,
            Ok(Err(e))      => {
                debug!("skipping container {}: {}", c.id, e);
                continue;
            }
            Err(_)          => return Err(anyhow!("docker inspect {} timed out after {:?}", c.id, limit)),
        };

        let pid = pid_t::try_from(details.state.pid)?;
        if pid == 0 {
            debug!("skipping container {}: not running", c.id);
            continue;
        }

        roots.insert(pid, identity(&c.labels));
    }

    debug!("found {} container root pids", roots.len());

    Ok(roots)
}

pub fn identity(labels: &HashMap<String, String>) -> ContainerIdentity {
    let label = |name: &str| labels.get(name).cloned().unwrap_or_default();

    ContainerIdentity {
        namespace: label(POD_NAMESPACE),
        pod:       label(POD_NAME),
        container: label(CONTAINER_NAME),
    }
}
