//! Credit balance arithmetic and the pre-generation credit gate.
//!
//! A balance has two buckets. Free credits are consumed first; paid credits
//! are consumed once the free bucket is empty. One successful generation
//! costs exactly one credit.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// Free credits granted when a balance is created lazily on first access.
pub const DEFAULT_FREE_CREDITS: i32 = 50;

/// Which bucket the next deduction comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBucket {
    Free,
    Paid,
}

impl CreditBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            CreditBucket::Free => "free",
            CreditBucket::Paid => "paid",
        }
    }
}

impl fmt::Display for CreditBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's free and paid credit counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditBalance {
    pub free_credits: i32,
    pub paid_credits: i32,
}

impl CreditBalance {
    pub fn new(free_credits: i32, paid_credits: i32) -> Self {
        Self {
            free_credits,
            paid_credits,
        }
    }

    /// Sum of both buckets.
    pub fn total(&self) -> i64 {
        i64::from(self.free_credits) + i64::from(self.paid_credits)
    }

    pub fn has_credits(&self) -> bool {
        self.total() > 0
    }

    pub fn next_bucket(&self) -> CreditBucket {
        if self.free_credits > 0 {
            CreditBucket::Free
        } else {
            CreditBucket::Paid
        }
    }

    /// Balance after one generation, or `None` when both buckets are empty.
    ///
    /// Same rule as `CreditRepo::deduct_one`: neither bucket goes negative.
    pub fn deduct_one(&self) -> Option<CreditBalance> {
        if !self.has_credits() {
            return None;
        }
        Some(match self.next_bucket() {
            CreditBucket::Free => Self::new(self.free_credits - 1, self.paid_credits),
            CreditBucket::Paid => Self::new(self.free_credits, self.paid_credits - 1),
        })
    }
}

/// Block a generation when the balance is exhausted.
pub fn ensure_can_generate(balance: &CreditBalance) -> Result<(), CoreError> {
    if balance.has_credits() {
        Ok(())
    } else {
        Err(CoreError::InsufficientCredits(
            "No credits remaining. Please upgrade your plan to continue generating.".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn free_credits_are_consumed_first() {
        let after = CreditBalance::new(1, 5).deduct_one();
        assert_eq!(after, Some(CreditBalance::new(0, 5)));
    }

    #[test]
    fn paid_credits_used_when_free_exhausted() {
        let after = CreditBalance::new(0, 3).deduct_one();
        assert_eq!(after, Some(CreditBalance::new(0, 2)));
    }

    #[test]
    fn deduct_from_empty_balance_is_refused() {
        assert_eq!(CreditBalance::new(0, 0).deduct_one(), None);
    }

    #[test]
    fn next_bucket_follows_free_count() {
        assert_eq!(CreditBalance::new(2, 0).next_bucket(), CreditBucket::Free);
        assert_eq!(CreditBalance::new(0, 2).next_bucket(), CreditBucket::Paid);
        assert_eq!(CreditBucket::Paid.to_string(), "paid");
    }

    #[test]
    fn gate_blocks_empty_balance() {
        assert_matches!(
            ensure_can_generate(&CreditBalance::new(0, 0)),
            Err(CoreError::InsufficientCredits(_))
        );
    }

    #[test]
    fn gate_allows_any_positive_bucket() {
        assert!(ensure_can_generate(&CreditBalance::new(1, 0)).is_ok());
        assert!(ensure_can_generate(&CreditBalance::new(0, 1)).is_ok());
    }

    #[test]
    fn total_does_not_overflow() {
        let b = CreditBalance::new(i32::MAX, i32::MAX);
        assert_eq!(b.total(), 2 * i64::from(i32::MAX));
    }
}
