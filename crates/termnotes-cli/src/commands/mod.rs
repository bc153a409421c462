//! Command handlers, one function per subcommand.

pub mod maintenance;
pub mod notes;
pub mod transfer;
