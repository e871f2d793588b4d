use regex::Regex;
use std::sync::LazyLock;

/// Saved-slice colour when a goal has none set.
pub(crate) const DEFAULT_SAVED_COLOR: &str = "#22c55e";
/// Remaining-slice colour when a goal has none set.
pub(crate) const DEFAULT_LEFT_COLOR: &str = "#ef4444";
pub(crate) const INCOME_COLOR: &str = "#22c55e";

/// Tailwind text/background class pairs, cycled by index for expenses and goals.
pub(crate) const EXPENSE_COLORS: &[&str] = &[
    "text-red-700 bg-red-100",
    "text-orange-700 bg-orange-100",
    "text-yellow-700 bg-yellow-100",
    "text-pink-700 bg-pink-100",
    "text-purple-700 bg-purple-100",
    "text-blue-700 bg-blue-100",
    "text-green-700 bg-green-100",
];

const BG_HEX: &[(&str, &str)] = &[
    ("red-100", "#fee2e2"),
    ("orange-100", "#ffedd5"),
    ("yellow-100", "#fef9c3"),
    ("pink-100", "#fce7f3"),
    ("purple-100", "#ede9fe"),
    ("blue-100", "#dbeafe"),
    ("green-100", "#dcfce7"),
];

static BG_CLASS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"bg-([a-z]+-[0-9]{3})").ok());

static HEX_COLOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").ok());

/// Resolve the `bg-*` class of a class list to a hex colour.
/// Unknown or missing classes fall back to `red-100`.
pub(crate) fn bg_hex(classes: &str) -> &'static str {
    let shade = BG_CLASS
        .as_ref()
        .and_then(|re| re.captures(classes))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("red-100");
    BG_HEX
        .iter()
        .find(|(name, _)| *name == shade)
        .or_else(|| BG_HEX.first())
        .map(|(_, hex)| *hex)
        .unwrap_or("#fee2e2")
}

/// Palette colour for the `idx`-th expense or goal.
pub(crate) fn palette_hex(idx: usize) -> &'static str {
    bg_hex(EXPENSE_COLORS[idx % EXPENSE_COLORS.len()])
}

/// Parse `#rrggbb` into its components.
pub(crate) fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let caps = HEX_COLOR.as_ref()?.captures(s.trim())?;
    let channel = |i: usize| {
        caps.get(i)
            .and_then(|m| u8::from_str_radix(m.as_str(), 16).ok())
    };
    Some((channel(1)?, channel(2)?, channel(3)?))
}

pub(crate) fn is_hex_color(s: &str) -> bool {
    parse_hex(s).is_some()
}
