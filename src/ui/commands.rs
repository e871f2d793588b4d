use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::{format_amount, parse_amount, parse_month};
use crate::models::{BudgetPatch, TransactionKind};
use crate::summary::palette::is_hex_color;
use crate::wallet::Wallet;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Wallet) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit MyWallet", cmd_quit, r);
    register_command!("quit", "Quit MyWallet", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add-txn",
        "Add transaction (e.g. :add-txn expense 4.50 Coffee)",
        cmd_add_txn,
        r
    );
    register_command!(
        "income",
        "Add income (e.g. :income 3000 Salary)",
        cmd_income,
        r
    );
    register_command!(
        "expense",
        "Add expense (e.g. :expense 1200 Rent)",
        cmd_expense,
        r
    );
    register_command!(
        "budget",
        "Add savings goal (e.g. :budget New Laptop 1500 #22c55e)",
        cmd_budget,
        r
    );
    register_command!(
        "save",
        "Add saving to selected goal (e.g. :save 2024-01 200)",
        cmd_save,
        r
    );
    register_command!("rename", "Rename selected goal", cmd_rename, r);
    register_command!(
        "target",
        "Change target of selected goal (e.g. :target 2000)",
        cmd_target,
        r
    );
    register_command!(
        "color",
        "Set saved colour of selected goal (e.g. :color #3b82f6)",
        cmd_color,
        r
    );
    register_command!(
        "left-color",
        "Set remaining colour of selected goal (e.g. :left-color #f97316)",
        cmd_left_color,
        r
    );
    register_command!(
        "delete-budget",
        "Delete selected goal and its savings",
        cmd_delete_budget,
        r
    );
    register_command!(
        "remove-saving",
        "Remove every saving for a month (e.g. :remove-saving 2024-01)",
        cmd_remove_saving,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/wallet.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    wallet: &mut Wallet,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, wallet)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _wallet: &mut Wallet) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _wallet: &mut Wallet) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _wallet: &mut Wallet) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, _wallet: &mut Wallet) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _wallet: &mut Wallet) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add_txn(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let mut parts = args.splitn(2, ' ');
    let kind_str = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("");
    match TransactionKind::parse(kind_str) {
        Some(kind) => add_transaction(kind, rest, app, wallet),
        None => {
            app.set_status("Usage: :add-txn <income|expense> <amount> <description>");
            Ok(())
        }
    }
}

fn cmd_income(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    add_transaction(TransactionKind::Income, args, app, wallet)
}

fn cmd_expense(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    add_transaction(TransactionKind::Expense, args, app, wallet)
}

/// `args` is `<amount> <description>`; both must be present.
fn add_transaction(
    kind: TransactionKind,
    args: &str,
    app: &mut App,
    wallet: &mut Wallet,
) -> anyhow::Result<()> {
    let mut parts = args.trim().splitn(2, ' ');
    let amount_str = parts.next().unwrap_or("");
    let description = parts.next().unwrap_or("").trim();

    if amount_str.is_empty() || description.is_empty() {
        app.set_status(format!("Usage: :{} <amount> <description>", kind.as_str()));
        return Ok(());
    }

    let amount = match parse_amount(amount_str) {
        Ok(a) => a,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let (_, status) = wallet.add_transaction(kind, amount, description.to_string());
    app.set_saved_status(
        format!("Added {kind}: {description} {}", format_amount(amount)),
        status,
    );
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let mut tokens: Vec<&str> = args.split_whitespace().collect();

    let color = match tokens.last() {
        Some(last) if is_hex_color(last) => {
            let c = last.to_string();
            tokens.pop();
            Some(c)
        }
        _ => None,
    };

    // Last token is the target, everything before is the name
    let (Some(target_str), true) = (tokens.pop(), !tokens.is_empty()) else {
        app.set_status("Usage: :budget <name> <target> [#rrggbb]");
        return Ok(());
    };
    let name = tokens.join(" ");

    let target = match parse_amount(target_str) {
        Ok(t) => t,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let (_, status) = wallet.add_budget(name.clone(), target, color);
    app.screen = Screen::Budgets;
    app.budget_index = wallet.budgets().len().saturating_sub(1);
    app.set_saved_status(
        format!("Added goal: {name} ({})", format_amount(target)),
        status,
    );
    Ok(())
}

fn cmd_save(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let Some((id, name)) = selected(app, wallet) else {
        return Ok(());
    };

    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :save <YYYY-MM> <amount>");
        return Ok(());
    }

    let month = match parse_month(parts[0]) {
        Ok(m) => m,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let amount = match parse_amount(parts[1]) {
        Ok(a) => a,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let status = wallet.add_saving(&id, month.clone(), amount);
    app.set_saved_status(
        format!("Saved {} to {name} for {month}", format_amount(amount)),
        status,
    );
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename <new name>");
        return Ok(());
    }
    edit_selected(
        app,
        wallet,
        BudgetPatch {
            name: Some(args.to_string()),
            ..Default::default()
        },
        format!("Renamed to: {args}"),
    );
    Ok(())
}

fn cmd_target(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let target = match parse_amount(args) {
        Ok(t) => t,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    edit_selected(
        app,
        wallet,
        BudgetPatch {
            target: Some(target),
            ..Default::default()
        },
        format!("Target set to {}", format_amount(target)),
    );
    Ok(())
}

fn cmd_color(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    if !is_hex_color(args) {
        app.set_status("Usage: :color #rrggbb");
        return Ok(());
    }
    edit_selected(
        app,
        wallet,
        BudgetPatch {
            color: Some(args.to_string()),
            ..Default::default()
        },
        format!("Saved colour set to {args}"),
    );
    Ok(())
}

fn cmd_left_color(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    if !is_hex_color(args) {
        app.set_status("Usage: :left-color #rrggbb");
        return Ok(());
    }
    edit_selected(
        app,
        wallet,
        BudgetPatch {
            left_color: Some(args.to_string()),
            ..Default::default()
        },
        format!("Remaining colour set to {args}"),
    );
    Ok(())
}

fn cmd_delete_budget(_args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let Some((id, name)) = selected(app, wallet) else {
        return Ok(());
    };
    app.confirm_message = format!("Delete goal '{name}' and all its savings?");
    app.pending_action = Some(PendingAction::DeleteBudget { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_remove_saving(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let Some(budget) = app.selected_budget(wallet) else {
        app.set_status("No goal selected");
        return Ok(());
    };

    let month = match parse_month(args) {
        Ok(m) => m,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };

    let count = budget.savings.iter().filter(|s| s.month == month).count();
    if count == 0 {
        let msg = format!("No savings for {month} in {}", budget.name);
        app.set_status(msg);
        return Ok(());
    }

    app.confirm_message = format!(
        "Remove {count} saving{} for {month} from '{}'?",
        if count == 1 { "" } else { "s" },
        budget.name
    );
    app.pending_action = Some(PendingAction::RemoveSaving {
        budget_id: budget.id.clone(),
        month,
    });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, wallet: &mut Wallet) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        crate::export::default_export_path()
    } else {
        crate::export::expand_home(args)
    };

    match crate::export::export_transactions(std::path::Path::new(&path), wallet.transactions()) {
        Ok(count) => app.set_status(format!("Exported {count} transactions to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

// ── Helpers ──────────────────────────────────────────────────

/// Id and name of the goal under the cursor, or a status hint when there is none.
fn selected(app: &mut App, wallet: &Wallet) -> Option<(String, String)> {
    let found = app
        .selected_budget(wallet)
        .map(|b| (b.id.clone(), b.name.clone()));
    if found.is_none() {
        app.set_status("No goal selected. Add one with :budget <name> <target>");
    }
    found
}

fn edit_selected(app: &mut App, wallet: &mut Wallet, patch: BudgetPatch, msg: String) {
    let Some((id, _)) = selected(app, wallet) else {
        return;
    };
    let status = wallet.edit_budget(&id, patch);
    app.set_saved_status(msg, status);
}

/// Carry out a confirmed action.
pub(crate) fn apply_pending(action: PendingAction, app: &mut App, wallet: &mut Wallet) {
    match action {
        PendingAction::DeleteBudget { id, name } => {
            let status = wallet.remove_budget(&id);
            app.clamp_budget_index(wallet.budgets().len());
            app.set_saved_status(format!("Deleted goal: {name}"), status);
        }
        PendingAction::RemoveSaving { budget_id, month } => {
            let status = wallet.remove_saving(&budget_id, &month);
            app.set_saved_status(format!("Removed savings for {month}"), status);
        }
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
