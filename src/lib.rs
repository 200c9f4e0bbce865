pub mod chain;
pub mod cli;
pub mod config;
pub mod convert;
pub mod engine;
pub mod format;
pub mod json;
pub mod tag;
pub mod value;

pub use chain::{cascade, cascade_with, Chain};
pub use engine::{EngineError, Options};
pub use tag::Tag;
pub use value::{Function, Value};
