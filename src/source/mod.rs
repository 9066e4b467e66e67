pub mod docker;
pub mod exec;
pub mod lsns;
pub mod netstat;

pub use exec::DEFAULT_TIMEOUT;
pub use lsns::Namespace;
