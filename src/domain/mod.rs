//! Core domain types and filtering logic.

pub mod config;
pub mod dataset;
pub mod error;
pub mod normalizer;
pub mod options;
pub mod predicate;
pub mod record;
pub mod selection;
pub mod style;
pub mod view;
