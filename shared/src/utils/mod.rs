//! Utility functions

pub mod masking;
pub mod validation;
