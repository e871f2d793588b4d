use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One contribution recorded against a savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saving {
    /// Format: "YYYY-MM"
    pub month: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl Saving {
    pub fn new(month: String, amount: Decimal) -> Self {
        Self { month, amount }
    }
}

/// A savings goal with its running list of contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_color: Option<String>,
    #[serde(default)]
    pub savings: Vec<Saving>,
}

impl Budget {
    pub fn new(id: String, name: String, target: Decimal, color: Option<String>) -> Self {
        Self {
            id,
            name,
            target,
            color,
            left_color: None,
            savings: Vec::new(),
        }
    }

    /// Sum of all contributions, saturating at the decimal range.
    pub fn total_saved(&self) -> Decimal {
        self.savings
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.amount))
    }

    pub fn progress(&self) -> BudgetProgress {
        let total_saved = self.total_saved();
        let percent = if self.target > Decimal::ZERO {
            total_saved
                .checked_div(self.target)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                // Out of range only when savings dwarf the target
                .unwrap_or(if total_saved.is_sign_negative() {
                    Decimal::ZERO
                } else {
                    Decimal::ONE_HUNDRED
                })
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };
        BudgetProgress {
            total_saved,
            percent,
            amount_left: self.target.saturating_sub(total_saved).max(Decimal::ZERO),
        }
    }

    /// Find a budget by id in a slice.
    pub fn find_by_id<'a>(budgets: &'a [Budget], id: &str) -> Option<&'a Budget> {
        budgets.iter().find(|b| b.id == id)
    }
}

/// Derived view of a goal's savings; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetProgress {
    pub total_saved: Decimal,
    /// Clamped to 0..=100.
    pub percent: Decimal,
    pub amount_left: Decimal,
}

/// Partial update for a budget. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub target: Option<Decimal>,
    pub color: Option<String>,
    pub left_color: Option<String>,
}

impl BudgetPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target.is_none()
            && self.color.is_none()
            && self.left_color.is_none()
    }

    pub(crate) fn apply(self, budget: &mut Budget) {
        if let Some(name) = self.name {
            budget.name = name;
        }
        if let Some(target) = self.target {
            budget.target = target;
        }
        if let Some(color) = self.color {
            budget.color = Some(color);
        }
        if let Some(left_color) = self.left_color {
            budget.left_color = Some(left_color);
        }
    }
}
