pub mod json;
pub mod table;

pub use format::Format;
pub use table::Row;

mod format;
