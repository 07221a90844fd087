pub mod config;
pub mod error;
pub mod import;
pub mod spec;
pub mod synth;

pub use error::{LoadError, ResolveError};
pub use spec::load_document;
pub use synth::convert;
