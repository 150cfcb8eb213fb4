//! Allocation engine: a bill divided into percentage shares
//!
//! Every mutating operation runs to completion and returns the new state;
//! amounts are re-derived from percentages before the call returns.

use std::num::NonZeroUsize;

use crate::domain::{Currency, DomainError};

/// The whole bill, in percent.
pub const FULL_PERCENTAGE: f64 = 100.0;

/// Tolerance used when checking that percentages sum to 100.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// One person's portion of the bill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Share {
    percentage: f64,
    amount: f64,
}

impl Share {
    fn with_percentage(percentage: f64) -> Self {
        Self {
            percentage,
            amount: 0.0,
        }
    }

    /// Percentage of the bill, in [0, 100].
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Amount derived from the total bill and `percentage`.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Total bill, display currency and the ordered shares (person 1..N).
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    total_bill: f64,
    currency: Currency,
    shares: Vec<Share>,
}

impl Split {
    /// Create an equal split among `people`.
    pub fn new(total_bill: f64, people: NonZeroUsize, currency: Currency) -> Self {
        let mut split = Self {
            total_bill,
            currency,
            shares: Vec::new(),
        };
        split.set_people_count(people);
        split
    }

    /// Create a split from explicit percentages.
    ///
    /// The list must be non-empty, every entry finite and non-negative, and
    /// the entries must sum to 100 within [`SUM_TOLERANCE`].
    pub fn from_percentages(
        total_bill: f64,
        percentages: &[f64],
        currency: Currency,
    ) -> Result<Self, DomainError> {
        if percentages.is_empty() {
            return Err(DomainError::EmptySplit);
        }
        for (index, &value) in percentages.iter().enumerate() {
            if !value.is_finite() {
                return Err(DomainError::InvalidPercentage(value));
            }
            if value < 0.0 {
                return Err(DomainError::NegativePercentage { index, value });
            }
        }
        let sum: f64 = percentages.iter().sum();
        if (sum - FULL_PERCENTAGE).abs() > SUM_TOLERANCE {
            return Err(DomainError::UnbalancedPercentages(sum));
        }

        let mut split = Self {
            total_bill,
            currency,
            shares: percentages
                .iter()
                .copied()
                .map(Share::with_percentage)
                .collect(),
        };
        split.derive_amounts();
        Ok(split)
    }

    pub fn total_bill(&self) -> f64 {
        self.total_bill
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn num_people(&self) -> usize {
        self.shares.len()
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.shares.iter().map(Share::percentage).collect()
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.shares.iter().map(Share::amount).collect()
    }

    /// Sum of all percentages.
    pub fn allocated_percentage(&self) -> f64 {
        self.shares.iter().map(Share::percentage).sum()
    }

    /// `100 - allocated`. Positive while under-allocated, negative when a
    /// clamped rebalance left the split over-allocated.
    pub fn unallocated_percentage(&self) -> f64 {
        FULL_PERCENTAGE - self.allocated_percentage()
    }

    /// Whether the percentages sum to 100 within [`SUM_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        self.unallocated_percentage().abs() <= SUM_TOLERANCE
    }

    /// Store a new total; percentages are untouched.
    ///
    /// The sign is not validated here. Callers reject negative totals.
    pub fn set_total_bill(&mut self, amount: f64) -> &Self {
        self.total_bill = amount;
        self.derive_amounts();
        self
    }

    /// Replace all shares with `people` equal shares, discarding any custom
    /// allocation.
    pub fn set_people_count(&mut self, people: NonZeroUsize) -> &Self {
        let equal = FULL_PERCENTAGE / people.get() as f64;
        self.shares = vec![Share::with_percentage(equal); people.get()];
        self.derive_amounts();
        self
    }

    /// Add one person, keeping the relative proportions of existing shares.
    ///
    /// Existing shares are scaled by `n / (n + 1)` and the newcomer gets
    /// `100 / (n + 1)`, so a balanced split stays balanced.
    pub fn add_person(&mut self) -> &Self {
        let people = self.shares.len() as f64;
        let next = people + 1.0;
        for share in &mut self.shares {
            share.percentage = share.percentage * people / next;
        }
        self.shares.push(Share::with_percentage(FULL_PERCENTAGE / next));
        self.derive_amounts();
        self
    }

    /// Set one share's percentage and rebalance the others in a single pass.
    ///
    /// `value` is clamped to [0, 100]. If the new sum exceeds 100, the excess
    /// is taken evenly from every other share, each floored at 0. Whatever a
    /// clamped share could not give up is not redistributed, so the sum may
    /// stay above 100. A sum at or below 100 is left as is.
    pub fn set_percentage(&mut self, index: usize, value: f64) -> Result<&Self, DomainError> {
        let people = self.shares.len();
        if index >= people {
            return Err(DomainError::ShareOutOfRange { index, people });
        }
        if value.is_nan() {
            return Err(DomainError::InvalidPercentage(value));
        }

        self.shares[index].percentage = value.clamp(0.0, FULL_PERCENTAGE);

        let sum = self.allocated_percentage();
        // a single share has nobody to take the excess from
        if sum > FULL_PERCENTAGE && people > 1 {
            let reduction = (sum - FULL_PERCENTAGE) / (people - 1) as f64;
            for (i, share) in self.shares.iter_mut().enumerate() {
                if i != index {
                    share.percentage = (share.percentage - reduction).max(0.0);
                }
            }
        }

        self.derive_amounts();
        Ok(&*self)
    }

    /// Give every share `100 / n`.
    pub fn split_equally(&mut self) -> &Self {
        let equal = FULL_PERCENTAGE / self.shares.len() as f64;
        for share in &mut self.shares {
            share.percentage = equal;
        }
        self.derive_amounts();
        self
    }

    /// Change the display currency. Amounts are not converted.
    pub fn set_currency(&mut self, currency: Currency) -> &Self {
        self.currency = currency;
        self
    }

    fn derive_amounts(&mut self) {
        let total = self.total_bill;
        for share in &mut self.shares {
            share.amount = total * share.percentage / FULL_PERCENTAGE;
        }
    }
}
