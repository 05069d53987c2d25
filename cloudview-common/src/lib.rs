//! # Cloudview Common
//!
//! Small utilities shared by every cloudview crate. At the moment this is
//! logging only: subscriber initialisation and the [`Pretty`] formatter used
//! to dump schemas, policies and sync reports into trace output.

pub mod logging;

pub use logging::{init_tracing, Pretty};
