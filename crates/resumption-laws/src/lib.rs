//! Executable algebraic laws
//!
//! The laws of monads, modules, ideals and resumptions cannot be enforced by
//! the type system. This crate checks them on deterministic samples:
//!
//! - [`LawConfig`] controls how many samples are drawn and how deep they
//!   grow, and is loaded from TOML;
//! - [`LawChecker`] runs individual law groups against any brand;
//! - [`check_all_instances`] runs every group against the instances shipped
//!   in `resumption_instances`.
//!
//! Violations are reported as [`LawError::Violation`] and logged with
//! `tracing`.

pub mod checks;
pub mod config;
pub mod error;
pub mod report;
pub mod sampler;
pub mod suite;

pub use checks::LawChecker;
pub use config::LawConfig;
pub use error::{LawError, LawResult};
pub use report::{LawOutcome, LawReport};
pub use sampler::Sampler;
pub use suite::check_all_instances;
