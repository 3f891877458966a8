//! Directional exchange-rate quotes and conversion.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Converted amounts round to 2 decimal places (money display precision)
//! - Use banker's rounding (round half to even)
//! - Store both original and converted amounts

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use expensa_shared::CurrencyCode;

/// Errors that can occur during currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// No quote exists for the requested currency pair.
    #[error("No exchange rate available from {from} to {to}")]
    RateUnavailable {
        /// Source currency of the failed lookup.
        from: CurrencyCode,
        /// Target currency of the failed lookup.
        to: CurrencyCode,
    },
}

/// A directional exchange-rate quote between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from: CurrencyCode,
    /// Target currency code.
    pub to: CurrencyCode,
    /// Exchange rate (1 `from` = `rate` `to`).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(from: CurrencyCode, to: CurrencyCode, rate: Decimal) -> Self {
        Self { from, to, rate }
    }

    /// Returns the mathematically inverse quote.
    ///
    /// Market quotes are rarely exact reciprocals; use this only when one
    /// quote has to serve both directions.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            rate: Decimal::ONE / self.rate,
        }
    }
}

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// In-memory table of directional exchange-rate quotes.
///
/// Lookups are directional: registering EUR→USD says nothing about
/// USD→EUR, since market quotes are not reciprocals. Same-currency
/// conversions always succeed and leave the amount untouched.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    quotes: HashMap<CurrencyCode, HashMap<CurrencyCode, Decimal>>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a collection of quotes.
    #[must_use]
    pub fn from_quotes(quotes: impl IntoIterator<Item = ExchangeRate>) -> Self {
        let mut table = Self::new();
        for quote in quotes {
            table.insert(quote);
        }
        table
    }

    /// Registers a quote, replacing any existing quote for the same pair.
    pub fn insert(&mut self, quote: ExchangeRate) {
        self.quotes
            .entry(quote.from)
            .or_default()
            .insert(quote.to, quote.rate);
    }

    /// Looks up the rate for a currency pair.
    ///
    /// Same-currency pairs always resolve to `Decimal::ONE`.
    #[must_use]
    pub fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        self.quotes.get(from).and_then(|rates| rates.get(to)).copied()
    }

    /// Converts an amount between currencies.
    ///
    /// Identity when the currencies match; otherwise the amount is
    /// multiplied by the registered quote and rounded to 2 decimal places
    /// with banker's rounding.
    ///
    /// # Errors
    ///
    /// Returns `RateError::RateUnavailable` when no quote is registered
    /// for the pair.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, RateError> {
        if from == to {
            return Ok(amount);
        }

        let rate = self.rate(from, to).ok_or_else(|| RateError::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
        })?;

        Ok(convert_amount(amount, rate, 2))
    }
}
