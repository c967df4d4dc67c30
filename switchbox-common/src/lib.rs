#![no_std]
extern crate alloc;

pub mod codec;
pub mod compiler;
pub mod error;
pub mod event;
pub mod keycodes;
pub mod mapping;

pub use codec::{EventCodec, EventRegistry};
pub use compiler::{compile, MappingCompiler};
pub use error::{ConfigError, ErrorKind, LineContext};
pub use event::{Event, EventGroup, HoldTarget, ScrollDirection};
pub use mapping::{MappingMode, MappingSet, Page, Shortcut, Switch};

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
