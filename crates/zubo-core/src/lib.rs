pub mod config;
pub mod error;
pub mod logging;
pub mod text;

// Pipeline stages, in execution order.
pub mod fetch;
pub mod harvest;
pub mod expand;
pub mod playlist;
pub mod pipeline;
