//! Profit-Sharing Engine for construction and real-estate projects
//!
//! This crate computes how much of a project's net profit is paid out under
//! one of seven configurable formulas, with an itemized breakdown of every
//! share. Rules can be supplied per request or loaded from YAML files and
//! served over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
