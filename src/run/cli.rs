use anyhow::Result;
use rust_decimal::Decimal;
use std::path::Path;

use crate::models::{BudgetPatch, TransactionKind};
use crate::store::SaveStatus;
use crate::summary;
use crate::summary::palette::is_hex_color;
use crate::ui::util::{format_amount, format_percent, parse_amount, parse_month};
use crate::wallet::Wallet;

pub(crate) fn as_cli(args: &[String], wallet: &mut Wallet) -> Result<()> {
    warn_lost_data(wallet);
    match args[1].as_str() {
        "add-txn" => cli_add_txn(&args[2..], wallet),
        "add-budget" => cli_add_budget(&args[2..], wallet),
        "add-saving" => cli_add_saving(&args[2..], wallet),
        "edit-budget" => cli_edit_budget(&args[2..], wallet),
        "remove-budget" => cli_remove_budget(&args[2..], wallet),
        "remove-saving" => cli_remove_saving(&args[2..], wallet),
        "transactions" | "txns" => cli_transactions(wallet),
        "budgets" => cli_budgets(wallet),
        "summary" | "s" => cli_summary(wallet),
        "export" => cli_export(&args[2..], wallet),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("mywallet {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("MyWallet: income, expenses and savings goals");
    println!();
    println!("Usage: mywallet [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                   Launch interactive TUI");
    println!("  add-txn <income|expense> <amount> <desc> Record a transaction");
    println!("  add-budget <target> <name> [--color #rrggbb]");
    println!("                                           Create a savings goal");
    println!("  add-saving <id> <YYYY-MM> <amount>       Add a contribution to a goal");
    println!("  edit-budget <id> [--name <name>] [--target <amount>]");
    println!("              [--color #rrggbb] [--left-color #rrggbb]");
    println!("                                           Change goal fields");
    println!("  remove-budget <id>                       Delete a goal");
    println!("  remove-saving <id> <YYYY-MM>             Delete a goal's savings for a month");
    println!("  transactions                             List transactions");
    println!("  budgets                                  List goals with progress");
    println!("  summary                                  Print totals and goal progress");
    println!("  export [path]                            Export transactions to CSV");
    println!("  --help, -h                               Show this help");
    println!("  --version, -V                            Show version");
}

fn warn_lost_data(wallet: &Wallet) {
    let report = wallet.load_report();
    let stores = [
        ("transactions", &report.transactions),
        ("budgets", &report.budgets),
    ];
    for (name, outcome) in stores {
        if let Some(reason) = outcome.reason() {
            eprintln!("Warning: saved {name} could not be read ({reason}); starting empty");
        }
    }
}

/// Value following `--name` in `args`.
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Positional arguments, with `--flag value` pairs removed.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn amount_arg(input: &str) -> Result<Decimal> {
    parse_amount(input).map_err(anyhow::Error::msg)
}

fn color_arg(input: Option<&str>) -> Result<Option<String>> {
    match input {
        Some(c) if is_hex_color(c) => Ok(Some(c.to_string())),
        Some(c) => anyhow::bail!("Invalid colour: {c}. Use #rrggbb"),
        None => Ok(None),
    }
}

fn report(status: SaveStatus, done: &str) -> Result<()> {
    match status {
        SaveStatus::Saved => {
            println!("{done}");
            Ok(())
        }
        SaveStatus::Failed => {
            anyhow::bail!("{done}, but it could not be saved (see mywallet.log)")
        }
        SaveStatus::Skipped => anyhow::bail!("Nothing changed"),
    }
}

fn cli_add_txn(args: &[String], wallet: &mut Wallet) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: mywallet add-txn <income|expense> <amount> <description>");
    }
    let kind = TransactionKind::parse(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Type must be income or expense, got: {}", args[0]))?;
    let amount = amount_arg(&args[1])?;
    let description = args[2..].join(" ");
    if description.trim().is_empty() {
        anyhow::bail!("Description is required");
    }

    let (id, status) = wallet.add_transaction(kind, amount, description.clone());
    report(
        status,
        &format!("Added {kind} {id}: {description} {}", format_amount(amount)),
    )
}

fn cli_add_budget(args: &[String], wallet: &mut Wallet) -> Result<()> {
    let pos = positional(args);
    if pos.len() < 2 {
        anyhow::bail!("Usage: mywallet add-budget <target> <name> [--color #rrggbb]");
    }
    let target = amount_arg(pos[0])?;
    let name = pos[1..].join(" ");
    let color = color_arg(flag(args, "--color"))?;

    let (id, status) = wallet.add_budget(name.clone(), target, color);
    report(status, &format!("Added goal {id}: {name} ({})", format_amount(target)))
}

fn cli_add_saving(args: &[String], wallet: &mut Wallet) -> Result<()> {
    if args.len() != 3 {
        anyhow::bail!("Usage: mywallet add-saving <budget-id> <YYYY-MM> <amount>");
    }
    let month = parse_month(&args[1]).map_err(anyhow::Error::msg)?;
    let amount = amount_arg(&args[2])?;
    if wallet.budget(&args[0]).is_none() {
        anyhow::bail!("No goal with id {}", args[0]);
    }

    let status = wallet.add_saving(&args[0], month.clone(), amount);
    report(status, &format!("Saved {} for {month}", format_amount(amount)))
}

fn cli_edit_budget(args: &[String], wallet: &mut Wallet) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!(
            "Usage: mywallet edit-budget <id> [--name <name>] [--target <amount>] [--color #rrggbb] [--left-color #rrggbb]"
        );
    };
    let rest = &args[1..];
    let patch = BudgetPatch {
        name: flag(rest, "--name").map(str::to_string),
        target: flag(rest, "--target").map(amount_arg).transpose()?,
        color: color_arg(flag(rest, "--color"))?,
        left_color: color_arg(flag(rest, "--left-color"))?,
    };
    if patch.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --name, --target, --color, --left-color"
        );
    }
    if wallet.budget(id).is_none() {
        anyhow::bail!("No goal with id {id}");
    }

    let status = wallet.edit_budget(id, patch);
    report(status, &format!("Updated goal {id}"))
}

fn cli_remove_budget(args: &[String], wallet: &mut Wallet) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: mywallet remove-budget <id>");
    };
    let existed = wallet.budget(id).is_some();
    let status = wallet.remove_budget(id);
    if existed {
        report(status, &format!("Removed goal {id}"))
    } else {
        report(status, &format!("No goal with id {id}; nothing removed"))
    }
}

fn cli_remove_saving(args: &[String], wallet: &mut Wallet) -> Result<()> {
    if args.len() != 2 {
        anyhow::bail!("Usage: mywallet remove-saving <budget-id> <YYYY-MM>");
    }
    let month = parse_month(&args[1]).map_err(anyhow::Error::msg)?;
    if wallet.budget(&args[0]).is_none() {
        anyhow::bail!("No goal with id {}", args[0]);
    }

    let status = wallet.remove_saving(&args[0], &month);
    report(status, &format!("Removed savings for {month}"))
}

fn cli_transactions(wallet: &Wallet) -> Result<()> {
    let txns = wallet.transactions();
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!("{:<15} {:<8} {:>14}  Description", "ID", "Type", "Amount");
    println!("{}", "─".repeat(60));
    for t in txns {
        println!(
            "{:<15} {:<8} {:>14}  {}",
            t.id,
            t.kind,
            format_amount(t.amount),
            t.description
        );
    }
    Ok(())
}

fn cli_budgets(wallet: &Wallet) -> Result<()> {
    let budgets = wallet.budgets();
    if budgets.is_empty() {
        println!("No goals");
        return Ok(());
    }

    println!(
        "{:<15} {:<20} {:>14} {:>14} {:>8}",
        "ID", "Name", "Saved", "Target", "Done"
    );
    println!("{}", "─".repeat(75));
    for b in budgets {
        let p = b.progress();
        println!(
            "{:<15} {:<20} {:>14} {:>14} {:>8}",
            b.id,
            b.name,
            format_amount(p.total_saved),
            format_amount(b.target),
            format_percent(p.percent)
        );
        for s in &b.savings {
            println!("{:<15}   {} {}", "", s.month, format_amount(s.amount));
        }
    }
    Ok(())
}

fn cli_summary(wallet: &Wallet) -> Result<()> {
    let totals = summary::totals(wallet.transactions());

    println!("MyWallet summary");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_amount(totals.income));
    println!("  Expenses:   {}", format_amount(totals.expense));
    println!("  Net:        {}", format_amount(totals.net()));
    println!(
        "  Total Txns: {}",
        totals.income_count + totals.expense_count
    );

    let goals = summary::goal_views(wallet.budgets());
    if !goals.is_empty() {
        println!();
        println!("Savings Goals:");
        for g in &goals {
            println!(
                "  {:<24} {:>7}  saved {}  left {}",
                g.name,
                format_percent(g.progress.percent),
                format_amount(g.progress.total_saved),
                format_amount(g.progress.amount_left)
            );
        }
    }

    Ok(())
}

fn cli_export(args: &[String], wallet: &Wallet) -> Result<()> {
    let output_path = args
        .first()
        .map(|a| crate::export::expand_home(a))
        .unwrap_or_else(crate::export::default_export_path);

    let count = crate::export::export_transactions(Path::new(&output_path), wallet.transactions())?;
    println!("Exported {count} transactions to {output_path}");
    Ok(())
}
