//! CLI command handlers, one file per command.

mod assemble;
mod expand;
mod harvest;
mod run;
mod sources;

pub use assemble::run_assemble;
pub use expand::run_expand;
pub use harvest::run_harvest;
pub use run::run_pipeline;
pub use sources::run_sources;
