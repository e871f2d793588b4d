//! Read-only aggregates computed from store snapshots for the overview.

pub(crate) mod palette;

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{Budget, BudgetProgress, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    pub(crate) expense: Decimal,
    pub(crate) income_count: usize,
    pub(crate) expense_count: usize,
}

impl Totals {
    pub(crate) fn net(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }
}

pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    transactions.iter().fold(Totals::default(), |mut acc, t| {
        if t.is_income() {
            acc.income = acc.income.saturating_add(t.amount);
            acc.income_count += 1;
        } else {
            acc.expense = acc.expense.saturating_add(t.amount);
            acc.expense_count += 1;
        }
        acc
    })
}

/// One slice of the income/expense breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slice {
    pub(crate) label: String,
    pub(crate) amount: Decimal,
    pub(crate) color: &'static str,
}

/// Income as one slice, followed by every expense on its own, in list order.
pub(crate) fn breakdown(transactions: &[Transaction]) -> Vec<Slice> {
    let income = Slice {
        label: "Income".into(),
        amount: totals(transactions).income,
        color: palette::INCOME_COLOR,
    };
    let expenses = transactions
        .iter()
        .filter(|t| t.is_expense())
        .enumerate()
        .map(|(idx, t)| Slice {
            label: t.description.clone(),
            amount: t.amount,
            color: palette::palette_hex(idx),
        });
    std::iter::once(income).chain(expenses).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SavingsSeries {
    pub(crate) name: String,
    pub(crate) color: &'static str,
    /// One value per entry of [`SavingsChart::months`].
    pub(crate) values: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SavingsChart {
    /// Every month with a contribution in any goal, ascending.
    pub(crate) months: Vec<String>,
    pub(crate) series: Vec<SavingsSeries>,
}

impl SavingsChart {
    pub(crate) fn max_value(&self) -> Decimal {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Value added per goal per month. Months a goal has no entry for read as zero.
pub(crate) fn savings_by_month(budgets: &[Budget]) -> SavingsChart {
    let months: Vec<String> = budgets
        .iter()
        .flat_map(|b| b.savings.iter().map(|s| s.month.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = budgets
        .iter()
        .enumerate()
        .map(|(idx, b)| {
            let mut per_month: BTreeMap<&str, Decimal> = BTreeMap::new();
            for s in &b.savings {
                let sum = per_month.entry(s.month.as_str()).or_default();
                *sum = sum.saturating_add(s.amount);
            }
            SavingsSeries {
                name: b.name.clone(),
                color: palette::palette_hex(idx),
                values: months
                    .iter()
                    .map(|m| per_month.get(m.as_str()).copied().unwrap_or(Decimal::ZERO))
                    .collect(),
            }
        })
        .collect();

    SavingsChart { months, series }
}

/// A goal ready to draw: progress plus resolved colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoalView {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) target: Decimal,
    pub(crate) progress: BudgetProgress,
    pub(crate) saved_color: String,
    pub(crate) left_color: String,
    pub(crate) palette_color: &'static str,
}

pub(crate) fn goal_views(budgets: &[Budget]) -> Vec<GoalView> {
    budgets
        .iter()
        .enumerate()
        .map(|(idx, b)| GoalView {
            id: b.id.clone(),
            name: b.name.clone(),
            target: b.target,
            progress: b.progress(),
            saved_color: b
                .color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| palette::DEFAULT_SAVED_COLOR.to_string()),
            left_color: b
                .left_color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| palette::DEFAULT_LEFT_COLOR.to_string()),
            palette_color: palette::palette_hex(idx),
        })
        .collect()
}

#[cfg(test)]
mod tests;
