#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::palette::*;
use super::*;
use crate::models::{Saving, TransactionKind};

fn txn(id: &str, kind: TransactionKind, amount: Decimal, desc: &str) -> Transaction {
    Transaction::new(id.into(), kind, amount, desc.into())
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        txn("1", TransactionKind::Income, dec!(3000), "Salary"),
        txn("2", TransactionKind::Expense, dec!(1200), "Rent"),
        txn("3", TransactionKind::Income, dec!(250.50), "Freelance"),
        txn("4", TransactionKind::Expense, dec!(80.25), "Groceries"),
    ]
}

fn budget(id: &str, name: &str, target: Decimal, savings: &[(&str, Decimal)]) -> Budget {
    let mut b = Budget::new(id.into(), name.into(), target, None);
    b.savings = savings
        .iter()
        .map(|(m, a)| Saving::new((*m).into(), *a))
        .collect();
    b
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals() {
    let t = totals(&sample_transactions());
    assert_eq!(t.income, dec!(3250.50));
    assert_eq!(t.expense, dec!(1280.25));
    assert_eq!(t.net(), dec!(1970.25));
    assert_eq!(t.income_count, 2);
    assert_eq!(t.expense_count, 2);
}

#[test]
fn test_totals_saturate_on_huge_amounts() {
    let txns = vec![
        txn("1", TransactionKind::Income, Decimal::MAX, "a"),
        txn("2", TransactionKind::Income, Decimal::MAX, "b"),
        txn("3", TransactionKind::Expense, Decimal::MAX, "c"),
    ];
    let t = totals(&txns);
    assert_eq!(t.income, Decimal::MAX);
    assert_eq!(t.net(), Decimal::ZERO);

    let budgets = vec![budget(
        "b",
        "Big",
        dec!(1),
        &[("2024-01", Decimal::MAX), ("2024-01", Decimal::MAX)],
    )];
    assert_eq!(savings_by_month(&budgets).series[0].values, vec![Decimal::MAX]);
}

#[test]
fn test_totals_empty() {
    let t = totals(&[]);
    assert_eq!(t, Totals::default());
    assert_eq!(t.net(), Decimal::ZERO);
}

// ── Breakdown ─────────────────────────────────────────────────

#[test]
fn test_breakdown_income_first_then_each_expense() {
    let slices = breakdown(&sample_transactions());
    let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Income", "Rent", "Groceries"]);
    assert_eq!(slices[0].amount, dec!(3250.50));
    assert_eq!(slices[0].color, INCOME_COLOR);
    assert_eq!(slices[1].color, "#fee2e2");
    assert_eq!(slices[2].color, "#ffedd5");
}

#[test]
fn test_breakdown_palette_wraps() {
    let txns: Vec<Transaction> = (0..9)
        .map(|i| txn(&i.to_string(), TransactionKind::Expense, dec!(1), "x"))
        .collect();
    let slices = breakdown(&txns);
    // slice 0 is income; expense #7 reuses the first colour
    assert_eq!(slices[8].color, slices[1].color);
}

#[test]
fn test_breakdown_no_transactions() {
    let slices = breakdown(&[]);
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].amount, Decimal::ZERO);
}

// ── Savings chart ─────────────────────────────────────────────

#[test]
fn test_savings_months_sorted_and_shared() {
    let budgets = vec![
        budget("1", "Car", dec!(5000), &[("2024-03", dec!(100)), ("2024-01", dec!(200))]),
        budget("2", "Trip", dec!(800), &[("2024-02", dec!(50))]),
    ];
    let chart = savings_by_month(&budgets);
    assert_eq!(chart.months, vec!["2024-01", "2024-02", "2024-03"]);
    assert_eq!(chart.series[0].values, vec![dec!(200), dec!(0), dec!(100)]);
    assert_eq!(chart.series[1].values, vec![dec!(0), dec!(50), dec!(0)]);
    assert_eq!(chart.max_value(), dec!(200));
}

#[test]
fn test_savings_same_month_summed() {
    let budgets = vec![budget(
        "1",
        "Car",
        dec!(5000),
        &[("2024-01", dec!(100)), ("2024-01", dec!(150))],
    )];
    let chart = savings_by_month(&budgets);
    assert_eq!(chart.months, vec!["2024-01"]);
    assert_eq!(chart.series[0].values, vec![dec!(250)]);
}

#[test]
fn test_savings_chart_empty() {
    let chart = savings_by_month(&[]);
    assert!(chart.months.is_empty());
    assert!(chart.series.is_empty());
    assert_eq!(chart.max_value(), Decimal::ZERO);
}

// ── Goal views ────────────────────────────────────────────────

#[test]
fn test_goal_view_default_colors() {
    let views = goal_views(&[budget("1", "Car", dec!(5000), &[("2024-01", dec!(500))])]);
    assert_eq!(views[0].saved_color, DEFAULT_SAVED_COLOR);
    assert_eq!(views[0].left_color, DEFAULT_LEFT_COLOR);
    assert_eq!(views[0].progress.percent, dec!(10));
}

#[test]
fn test_goal_view_custom_colors() {
    let mut b = budget("1", "Car", dec!(5000), &[]);
    b.color = Some("#0000ff".into());
    b.left_color = Some("#ff00ff".into());
    let views = goal_views(&[b]);
    assert_eq!(views[0].saved_color, "#0000ff");
    assert_eq!(views[0].left_color, "#ff00ff");
}

// ── Palette ───────────────────────────────────────────────────

#[test]
fn test_bg_hex() {
    assert_eq!(bg_hex("text-blue-700 bg-blue-100"), "#dbeafe");
    assert_eq!(bg_hex("text-green-700 bg-green-100"), "#dcfce7");
}

#[test]
fn test_bg_hex_fallback() {
    assert_eq!(bg_hex("text-blue-700"), "#fee2e2");
    assert_eq!(bg_hex("bg-teal-100"), "#fee2e2");
}

#[test]
fn test_palette_cycles() {
    assert_eq!(palette_hex(0), palette_hex(EXPENSE_COLORS.len()));
    assert_eq!(palette_hex(6), "#dcfce7");
}

#[test]
fn test_parse_hex() {
    assert_eq!(parse_hex("#22c55e"), Some((0x22, 0xc5, 0x5e)));
    assert_eq!(parse_hex("#FFFFFF"), Some((255, 255, 255)));
    assert_eq!(parse_hex("22c55e"), None);
    assert_eq!(parse_hex("#22c55"), None);
    assert!(is_hex_color(" #ef4444 "));
    assert!(!is_hex_color("red"));
}
