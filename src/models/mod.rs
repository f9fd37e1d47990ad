//! Core data models for rbreport.
//!
//! Epistemic mapping:
//! - K_i (Knowledge): Concrete types with compile-time guarantees
//! - B_i (Beliefs): Wrapped in Result/Option
//! - I^R (Resolvable): Config parameters and the split table

mod category;
mod config;
mod error;
mod record;

pub use category::*;
pub use config::*;
pub use error::*;
pub use record::*;
