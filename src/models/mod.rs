//! Core data models for the Profit-Sharing Engine.
//!
//! This module contains the domain models used throughout the engine.

mod input;
mod result;
mod rules;

pub use input::ProfitSharingInput;
pub use result::{BatchSummary, ProfitSharingBreakdown, ProfitSharingResult};
pub use rules::{FormulaType, GroupConfig, ProfitSharingRules, TierConfig};
