//! Budget transfer rules.
//!
//! A transfer moves planned budget between two projects within one month.
//! Validation and the debit/credit arithmetic are pure so conservation is
//! directly testable; the repository wraps them in one transaction.

use rust_decimal::Decimal;
use thiserror::Error;

/// Transfer validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The transfer amount must be positive.
    #[error("transfer amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// The source project's planned budget cannot cover the amount.
    #[error("insufficient planned balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Planned budget remaining on the source row.
        available: Decimal,
        /// Requested transfer amount.
        requested: Decimal,
    },
}

/// Validates a transfer against the source row's planned balance.
///
/// `source_plan` is `None` when the source has no monthly row - that is an
/// insufficient balance, not a missing record.
pub fn validate(source_plan: Option<Decimal>, amount: Decimal) -> Result<(), TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount(amount));
    }
    let available = source_plan.unwrap_or(Decimal::ZERO);
    if available < amount {
        return Err(TransferError::InsufficientBalance {
            available,
            requested: amount,
        });
    }
    Ok(())
}

/// Applies the debit and credit, returning the new `(source, target)` plans.
#[must_use]
pub fn apply(source_plan: Decimal, target_plan: Decimal, amount: Decimal) -> (Decimal, Decimal) {
    (source_plan - amount, target_plan + amount)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_validate_rejects_non_positive() {
        assert_eq!(
            validate(Some(dec!(100)), dec!(0)),
            Err(TransferError::NonPositiveAmount(dec!(0)))
        );
        assert_eq!(
            validate(Some(dec!(100)), dec!(-5)),
            Err(TransferError::NonPositiveAmount(dec!(-5)))
        );
    }

    #[test]
    fn test_validate_rejects_insufficient() {
        assert_eq!(
            validate(Some(dec!(100)), dec!(101)),
            Err(TransferError::InsufficientBalance {
                available: dec!(100),
                requested: dec!(101),
            })
        );
        assert_eq!(
            validate(None, dec!(1)),
            Err(TransferError::InsufficientBalance {
                available: dec!(0),
                requested: dec!(1),
            })
        );
    }

    #[test]
    fn test_validate_accepts_exact_balance() {
        assert!(validate(Some(dec!(100)), dec!(100)).is_ok());
    }

    #[test]
    fn test_apply_moves_amount() {
        let (source, target) = apply(dec!(1000), dec!(200), dec!(300));
        assert_eq!(source, dec!(700));
        assert_eq!(target, dec!(500));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(Decimal::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Conservation: the combined plan of both projects is unchanged by
        /// any transfer.
        #[test]
        fn prop_transfer_conserves_total(
            source in amount_strategy(),
            target in amount_strategy(),
            amount in amount_strategy(),
        ) {
            let (new_source, new_target) = apply(source, target, amount);
            prop_assert_eq!(new_source + new_target, source + target);
            prop_assert_eq!(source - new_source, amount);
            prop_assert_eq!(new_target - target, amount);
        }

        /// A validated transfer never drives the source plan negative.
        #[test]
        fn prop_validated_transfer_keeps_source_non_negative(
            source in amount_strategy(),
            target in amount_strategy(),
            amount in amount_strategy(),
        ) {
            if validate(Some(source), amount).is_ok() {
                let (new_source, _) = apply(source, target, amount);
                prop_assert!(new_source >= Decimal::ZERO);
            }
        }
    }
}
