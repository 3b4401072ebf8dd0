//! Credit balance row.

use lumen_core::credits::CreditBalance;
use lumen_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_credits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCredits {
    pub user_id: DbId,
    pub free_credits: i32,
    pub paid_credits: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserCredits {
    pub fn balance(&self) -> CreditBalance {
        CreditBalance::new(self.free_credits, self.paid_credits)
    }
}
