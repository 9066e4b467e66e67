pub mod data;
pub mod output;
pub mod proc;
pub mod resolve;
pub mod snapshot;
pub mod source;
pub mod summary;
