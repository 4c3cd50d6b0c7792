//! Typed build configuration for a JavaScript module bundler.
//!
//! [`BuildConfig`] is the whole descriptor: mode, entry module, module lookup
//! extensions, plugins, output location, development server and the ordered
//! loader rules. It is built once (from defaults, a file, the environment or a
//! JSON value), optionally validated, and handed to the bundler whole.

pub mod bundle;
pub mod config;
pub mod dev;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod mode;
pub mod paths;
pub mod validation;

// Re-export main types
pub use bundle::*;
pub use config::*;
pub use dev::*;
pub use error::*;
pub use mode::Mode;
pub use paths::ResolvedPaths;

// Re-export discovery and validation
pub use discovery::{discover, ConfigDiscovery, LoadedConfig};
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
