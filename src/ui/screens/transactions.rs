use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{Transaction, TransactionKind};
use crate::summary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};
use crate::wallet::Wallet;

/// Income and expense lists side by side, both following `transaction_scroll`.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, wallet: &Wallet) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (incomes, expenses): (Vec<&Transaction>, Vec<&Transaction>) =
        wallet.transactions().iter().partition(|t| t.is_income());
    let totals = summary::totals(wallet.transactions());

    render_list(
        f,
        columns[0],
        app,
        &incomes,
        format!("Income ({}) {}", incomes.len(), format_amount(totals.income)),
        theme::kind_style(TransactionKind::Income),
        ":income <amount> <description>",
    );
    render_list(
        f,
        columns[1],
        app,
        &expenses,
        format!("Expenses ({}) {}", expenses.len(), format_amount(totals.expense)),
        theme::kind_style(TransactionKind::Expense),
        ":expense <amount> <description>",
    );
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    app: &App,
    items: &[&Transaction],
    title: String,
    amount_style: Style,
    hint: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if items.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("Nothing here yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(format!("Add one with {hint}"), theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header = Row::new(
        ["Description", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let desc_width = area.width.saturating_sub(20) as usize;
    let scroll = app.transaction_scroll.min(items.len().saturating_sub(1));

    let rows: Vec<Row> = items
        .iter()
        .enumerate()
        .skip(scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&txn.description, desc_width)),
                Cell::from(Span::styled(format_amount(txn.amount), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Min(10), Constraint::Length(16)];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
