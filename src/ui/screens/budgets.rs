use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::summary::{self, GoalView};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, percent_ratio, progress_bar, truncate};
use crate::wallet::Wallet;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, wallet: &Wallet) {
    let goals = summary::goal_views(wallet.budgets());
    if goals.is_empty() {
        render_empty(f, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_list(f, columns[0], app, &goals);
    if let Some(goal) = goals.get(app.budget_index) {
        render_detail(f, columns[1], wallet, goal);
    }
}

fn block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_list(f: &mut Frame, area: Rect, app: &App, goals: &[GoalView]) {
    let items: Vec<ListItem> = goals
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, goal)| {
            let (color, _) = theme::goal_colors(goal);
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let bar = progress_bar(percent_ratio(goal.progress.percent), 20);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&goal.name, 17)), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(goal.progress.total_saved),
                        format_amount(goal.target)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {}", format_percent(goal.progress.percent)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block(format!(" Savings Goals ({}) ", goals.len())));
    f.render_widget(list, area);
}

fn render_detail(f: &mut Frame, area: Rect, wallet: &Wallet, goal: &GoalView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Gauge
            Constraint::Length(4), // Saved / left
            Constraint::Min(3),    // Contributions
        ])
        .split(area);

    let (saved, left) = theme::goal_colors(goal);

    let gauge = Gauge::default()
        .block(block(format!(" {} ", goal.name)))
        .gauge_style(Style::default().fg(saved).bg(left))
        .ratio(percent_ratio(goal.progress.percent))
        .label(format_percent(goal.progress.percent));
    f.render_widget(gauge, rows[0]);

    let figures = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Target ", theme::dim_style()),
            Span::styled(format_amount(goal.target), theme::normal_style()),
        ]),
        Line::from(vec![
            Span::styled("Saved  ", theme::dim_style()),
            Span::styled(
                format_amount(goal.progress.total_saved),
                Style::default().fg(saved),
            ),
            Span::styled("   Left ", theme::dim_style()),
            Span::styled(
                format_amount(goal.progress.amount_left),
                Style::default().fg(left),
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(theme::OVERLAY)),
    );
    f.render_widget(figures, rows[1]);

    let savings = wallet
        .budget(&goal.id)
        .map(|b| b.savings.as_slice())
        .unwrap_or_default();
    let lines: Vec<ListItem> = if savings.is_empty() {
        vec![ListItem::new(Span::styled(
            "No savings yet. Use :save <YYYY-MM> <amount>",
            theme::dim_style(),
        ))]
    } else {
        savings
            .iter()
            .map(|s| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<10}", s.month), theme::normal_style()),
                    Span::styled(format_amount(s.amount), Style::default().fg(saved)),
                ]))
            })
            .collect()
    };

    let list = List::new(lines).block(block(format!(" Contributions ({}) ", savings.len())));
    f.render_widget(list, rows[2]);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No savings goals yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :budget <name> <target> [#rrggbb] to create one",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block(" Budgets ".to_string()));
    f.render_widget(msg, area);
}
