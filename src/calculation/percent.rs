//! Percentage helpers shared by the formula strategies.
//!
//! All arithmetic is checked. `None` means a value left the decimal range;
//! strategies turn that into [`EngineError::AmountOverflow`] through
//! [`OrOverflow`].

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::ProfitSharingInput;

/// Returns `rate` percent of `amount`, without rounding.
pub(crate) fn percent_of(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate.checked_div(Decimal::ONE_HUNDRED)?)
}

/// Returns `amount` as a percentage of `net_profit`, or zero when there is no
/// profit to relate it to.
pub(crate) fn share_of_profit(amount: Decimal, net_profit: Decimal) -> Option<Decimal> {
    if net_profit > Decimal::ZERO {
        amount.checked_div(net_profit)?.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        Some(Decimal::ZERO)
    }
}

/// Adds up amounts, failing instead of wrapping.
pub(crate) fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Attaches the project to an out-of-range computation.
pub(crate) trait OrOverflow<T> {
    fn or_overflow(self, input: &ProfitSharingInput) -> EngineResult<T>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, input: &ProfitSharingInput) -> EngineResult<T> {
        self.ok_or_else(|| EngineError::AmountOverflow {
            project_id: input.project_id.clone(),
        })
    }
}
