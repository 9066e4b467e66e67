use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use anyhow::{anyhow, Error};
use libc::pid_t;
use serde::{Serialize, Serializer};

pub const PLACEHOLDER: &str = "-";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Tcp6,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Connection {
    pub protocol:         Protocol,
    #[serde(serialize_with = "dash")]
    pub local_host:       String,
    #[serde(serialize_with = "dash")]
    pub local_port:       String,
    #[serde(serialize_with = "dash")]
    pub remote_host:      String,
    #[serde(serialize_with = "dash")]
    pub remote_port:      String,
    #[serde(serialize_with = "dash", rename = "connection_state")]
    pub state:            String,
    #[serde(skip)]
    pub pid:              pid_t,
}

/// Kubernetes coordinates of a container. All fields empty means the
/// owner could not be determined.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct ContainerIdentity {
    #[serde(serialize_with = "dash", rename = "pod_namespace")]
    pub namespace: String,
    #[serde(serialize_with = "dash", rename = "pod_name")]
    pub pod:       String,
    #[serde(serialize_with = "dash", rename = "container_name")]
    pub container: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub container:  Arc<ContainerIdentity>,
    #[serde(flatten)]
    pub connection: Connection,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Key {
    #[serde(flatten)]
    pub container:   Arc<ContainerIdentity>,
    #[serde(serialize_with = "dash")]
    pub remote_host: String,
    #[serde(serialize_with = "dash")]
    pub remote_port: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Count {
    #[serde(flatten)]
    pub key:   Key,
    pub count: usize,
}

impl ContainerIdentity {
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.pod.is_empty() && self.container.is_empty()
    }
}

impl Record {
    pub fn key(&self) -> Key {
        Key {
            container:   self.container.clone(),
            remote_host: self.connection.remote_host.clone(),
            remote_port: self.connection.remote_port.clone(),
        }
    }
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp  => "tcp",
            Self::Tcp6 => "tcp6",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp"  => Ok(Self::Tcp),
            "tcp6" => Ok(Self::Tcp6),
            _      => Err(anyhow!("unsupported protocol: {}", s)),
        }
    }
}

pub fn placeholder(value: &str) -> &str {
    match value {
        "" => PLACEHOLDER,
        _  => value,
    }
}

fn dash<S: Serializer>(value: &str, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(placeholder(value))
}
