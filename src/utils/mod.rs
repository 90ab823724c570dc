//! # utils
//!
//! Utilities

pub mod remote;
pub mod uri;
