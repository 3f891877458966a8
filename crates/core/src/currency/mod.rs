//! Exchange-rate quotes and base-currency conversion.

pub mod rates;

pub use rates::{ExchangeRate, RateError, RateTable, convert_amount};

#[cfg(test)]
mod props;
