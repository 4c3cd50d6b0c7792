//! Command implementations for the bundlecfg CLI.
//!
//! Each command lives in its own module and exposes an `execute` function
//! taking the parsed arguments and returning a `Result`.

pub mod check;
pub mod init;
pub mod rules;
pub mod schema;
pub mod show;
pub(crate) mod utils;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use rules::execute as rules_execute;
pub use schema::execute as schema_execute;
pub use show::execute as show_execute;
