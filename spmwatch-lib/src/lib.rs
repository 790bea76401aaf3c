#[macro_use]
mod macros;

pub mod catalog;
pub mod gswf;
pub mod memory_accessors;
pub mod settings;
mod value;
mod watch;

pub use catalog::Catalog;
pub use value::{Value, ValueParseError};
pub use watch::{Datatype, Watch, WatchError, WatchKind};
