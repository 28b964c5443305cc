use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// A ledger settles in exactly one currency; every [`Money`] value
/// carries its code so amounts from another ledger are caught early.
///
/// # Examples
///
/// ```
/// use group_ledger::core::money::CurrencyCode;
///
/// let usd = CurrencyCode::new("USD");
/// let eur = CurrencyCode::new("EUR");
/// assert_ne!(usd, eur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("money amount must not be negative, got {0}")]
    Negative(Decimal),
    #[error("cannot combine {left} with {right}")]
    CurrencyMismatch {
        left: CurrencyCode,
        right: CurrencyCode,
    },
    #[error("{0} {1} is too large to represent")]
    Overflow(Decimal, CurrencyCode),
}

/// An exact, non-negative amount in a single currency.
///
/// Amounts are kept as [`Decimal`], so no rounding happens when debts
/// are merged, netted or rerouted.
///
/// # Examples
///
/// ```
/// use group_ledger::core::money::{CurrencyCode, Money};
/// use rust_decimal_macros::dec;
///
/// let usd = CurrencyCode::new("USD");
/// let lunch = Money::new(dec!(12.50), usd.clone()).unwrap();
/// let taxi = Money::new(dec!(30), usd).unwrap();
///
/// let total = lunch.plus(&taxi).unwrap();
/// assert_eq!(total.amount(), dec!(42.50));
/// assert!(taxi.is_greater_than(&lunch));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

#[derive(Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    currency: CurrencyCode,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Money::new(repr.amount, repr.currency)
    }
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if amount < Decimal::ZERO {
            return Err(MoneyError::Negative(amount));
        }
        Ok(Self { amount, currency })
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Add `other`, failing rather than overflowing.
    pub fn plus(&self, other: &Money) -> Result<Money, MoneyError> {
        self.check_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| MoneyError::Overflow(self.amount, self.currency.clone()))?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Subtract `other`, failing rather than going below zero.
    pub fn minus(&self, other: &Money) -> Result<Money, MoneyError> {
        self.check_currency(other)?;
        Money::new(self.amount - other.amount, self.currency.clone())
    }

    pub fn is_greater_than(&self, other: &Money) -> bool {
        self.partial_cmp(other) == Some(Ordering::Greater)
    }

    pub fn is_less_than(&self, other: &Money) -> bool {
        self.partial_cmp(other) == Some(Ordering::Less)
    }

    pub fn is_equal(&self, other: &Money) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }

    fn check_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }
}

/// Amounts in different currencies are incomparable.
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.currency == other.currency).then(|| self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
