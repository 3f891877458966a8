//! Property-based tests for the rate table.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::currency::rates::{ExchangeRate, RateError, RateTable};
use expensa_shared::CurrencyCode;

fn usd() -> CurrencyCode {
    CurrencyCode::parse("USD").unwrap()
}

fn eur() -> CurrencyCode {
    CurrencyCode::parse("EUR").unwrap()
}

/// Strategy for positive money amounts (two decimal places).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for plausible exchange rates (four decimal places).
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same-currency conversion returns the amount untouched.
    #[test]
    fn prop_same_currency_identity(amount in arb_amount()) {
        let table = RateTable::new();
        prop_assert_eq!(table.convert(amount, &usd(), &usd()), Ok(amount));
    }

    /// Cross-currency conversion never carries more than cent precision.
    #[test]
    fn prop_converted_amount_has_cent_precision(
        amount in arb_amount(),
        rate in arb_rate(),
    ) {
        let table = RateTable::from_quotes([ExchangeRate::new(eur(), usd(), rate)]);
        let converted = table.convert(amount, &eur(), &usd()).unwrap();
        prop_assert!(converted.scale() <= 2);
    }

    /// An unregistered pair always reports which pair was missing.
    #[test]
    fn prop_missing_pair_is_an_error(amount in arb_amount()) {
        let table = RateTable::new();
        let result = table.convert(amount, &eur(), &usd());
        prop_assert_eq!(
            result,
            Err(RateError::RateUnavailable { from: eur(), to: usd() })
        );
    }

    /// Conversion at a fixed positive rate preserves amount ordering.
    #[test]
    fn prop_conversion_is_monotone(
        a in arb_amount(),
        b in arb_amount(),
        rate in arb_rate(),
    ) {
        let table = RateTable::from_quotes([ExchangeRate::new(eur(), usd(), rate)]);
        let ca = table.convert(a, &eur(), &usd()).unwrap();
        let cb = table.convert(b, &eur(), &usd()).unwrap();
        if a <= b {
            prop_assert!(ca <= cb);
        } else {
            prop_assert!(ca >= cb);
        }
    }
}
