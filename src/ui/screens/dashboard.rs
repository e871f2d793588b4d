use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
    },
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::summary::{self, GoalView};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, truncate};
use crate::wallet::Wallet;

pub(crate) fn render(f: &mut Frame, area: Rect, wallet: &Wallet) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),      // Summary cards
            Constraint::Percentage(50), // Breakdown + goals
            Constraint::Min(8),         // Savings over time
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let goals = summary::goal_views(wallet.budgets());

    render_summary_cards(f, chunks[0], wallet, &goals);
    render_breakdown(f, middle[0], wallet);
    render_goals(f, middle[1], &goals);
    render_savings_chart(f, chunks[2], wallet);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_summary_cards(f: &mut Frame, area: Rect, wallet: &Wallet, goals: &[GoalView]) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let totals = summary::totals(wallet.transactions());
    let net = totals.net();
    let saved = goals
        .iter()
        .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.progress.total_saved));

    render_card(
        f,
        cards[0],
        "Income",
        totals.income,
        theme::GREEN,
        format!("{} txns", totals.income_count),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        totals.expense,
        theme::RED,
        format!("{} txns", totals.expense_count),
    );
    render_card(
        f,
        cards[2],
        "Net",
        net,
        if net >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        String::new(),
    );
    render_card(
        f,
        cards[3],
        "Saved",
        saved,
        theme::ACCENT,
        format!("{} goals", goals.len()),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(titled_block(title));

    f.render_widget(text, area);
}

fn render_breakdown(f: &mut Frame, area: Rect, wallet: &Wallet) {
    let block = titled_block("Income vs Expenses");
    if wallet.transactions().is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions yet. Add one with :income or :expense",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = summary::breakdown(wallet.transactions())
        .into_iter()
        .map(|slice| {
            let color = theme::hex(slice.color, theme::ACCENT);
            Bar::default()
                .value(slice.amount.round().to_u64().unwrap_or(0))
                .text_value(format_amount(slice.amount))
                .label(Line::from(truncate(&slice.label, 10)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_goals(f: &mut Frame, area: Rect, goals: &[GoalView]) {
    let block = titled_block("Savings Goals");
    if goals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No goals yet. Use :budget <name> <target>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let lines: Vec<Line> = goals
        .iter()
        .flat_map(|g| {
            let (saved, left) = theme::goal_colors(g);
            [
                Line::from(vec![
                    Span::styled(
                        format!("{:<18}", truncate(&g.name, 17)),
                        Style::default()
                            .fg(theme::hex(g.palette_color, theme::TEXT))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format_percent(g.progress.percent),
                        Style::default().fg(saved),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("  Saved {}", format_amount(g.progress.total_saved)),
                        Style::default().fg(saved),
                    ),
                    Span::styled(
                        format!("  Left {}", format_amount(g.progress.amount_left)),
                        Style::default().fg(left),
                    ),
                ]),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_savings_chart(f: &mut Frame, area: Rect, wallet: &Wallet) {
    let chart = summary::savings_by_month(wallet.budgets());
    let block = titled_block("Savings per Month");
    if chart.months.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No savings recorded. Select a goal and use :save <YYYY-MM> <amount>",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, v.to_f64().unwrap_or(0.0)))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(&points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::hex(s.color, theme::ACCENT)))
                .data(data)
        })
        .collect();

    let x_max = chart.months.len().saturating_sub(1).max(1) as f64;
    let y_max = chart.max_value().to_f64().unwrap_or(0.0).max(1.0);
    let first = chart.months.first().cloned().unwrap_or_default();
    let last = chart.months.last().cloned().unwrap_or_default();

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, x_max])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format_amount(chart.max_value())]),
        );

    f.render_widget(widget, area);
}
