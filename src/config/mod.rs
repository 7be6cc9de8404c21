//! Configuration module
//!
//! Provides `SearchDefaults`, its builder and the environment overlay. The
//! core never reads the environment; defaults reach it as `TaskOptions`.

pub mod builder;
pub mod env;
pub mod types;

pub use builder::SearchDefaultsBuilder;
pub use types::SearchDefaults;
