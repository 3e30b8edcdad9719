//! Calculation logic for the Profit-Sharing Engine.
//!
//! This module contains the formula registry, the batch runner and the seven
//! formula strategies: fixed amount, simple percentage, fixed plus
//! percentage, tiered brackets, the special gated and capped formula,
//! grouped stakeholder cuts and the dynamic base-plus-increments formula.

mod batch;
mod dynamic;
mod fixed_only;
mod fixed_plus_percent;
mod grouped;
mod percent;
mod percent_simple;
mod registry;
mod special_formula;
mod tiered;

pub use batch::calculate_batch;
pub use dynamic::{BASE_AMOUNT_DESCRIPTION, DEFAULT_INCREMENT_THRESHOLD, calculate_dynamic};
pub use fixed_only::{FIXED_AMOUNT_DESCRIPTION, calculate_fixed_only};
pub use fixed_plus_percent::calculate_fixed_plus_percent;
pub use grouped::calculate_grouped;
pub use percent_simple::calculate_percent_simple;
pub use registry::{
    FormulaStrategy, FormulaTypeInfo, calculate, list_formula_types, strategy_for,
};
pub use special_formula::calculate_special_formula;
pub use tiered::calculate_tiered;
