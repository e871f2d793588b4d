use ratatui::style::{Color, Modifier, Style};

use crate::models::TransactionKind;
use crate::summary::palette::parse_hex;
use crate::summary::GoalView;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);
const SURFACE: Color = Color::Rgb(49, 50, 68);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Income reads green and expenses red wherever amounts are listed.
pub(crate) fn kind_style(kind: TransactionKind) -> Style {
    match kind {
        TransactionKind::Income => Style::default().fg(GREEN),
        TransactionKind::Expense => Style::default().fg(RED),
    }
}

/// Terminal colour for a `#rrggbb` string, falling back to `fallback`.
pub(crate) fn hex(color: &str, fallback: Color) -> Color {
    parse_hex(color)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

/// Saved and left colours of a goal. Unparseable user colours fall back to green and red.
pub(crate) fn goal_colors(goal: &GoalView) -> (Color, Color) {
    (hex(&goal.saved_color, GREEN), hex(&goal.left_color, RED))
}
