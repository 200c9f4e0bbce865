pub mod error;
pub mod evaluate;
pub mod executor;
pub mod options;
pub mod resolve;
pub mod scope;
pub mod shape;

pub use error::EngineError;
pub use executor::{conditions, execute};
pub use options::Options;
pub use resolve::resolve;
pub use scope::ChainScope;
pub use shape::{normalize, Step};
