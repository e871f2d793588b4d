use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};
use crate::wallet::Wallet;

pub(crate) fn as_tui(wallet: &mut Wallet) -> Result<()> {
    let mut app = App::new();
    app.report_load(wallet);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, wallet);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("tui exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    wallet: &mut Wallet,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, block borders, table header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, wallet);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, wallet)?,
                InputMode::Command => handle_command_input(key, app, wallet)?,
                InputMode::Confirm => handle_confirm_input(key, app, wallet),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, wallet: &mut Wallet) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => app.running = false,
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, wallet),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('d') if ctrl => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app, wallet);
            }
        }
        KeyCode::Char('u') if ctrl => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app, wallet),
        KeyCode::Char('1') => app.screen = Screen::Dashboard,
        KeyCode::Char('2') => app.screen = Screen::Transactions,
        KeyCode::Char('3') => app.screen = Screen::Budgets,
        KeyCode::Tab => cycle_screen(app, 1),
        KeyCode::BackTab => cycle_screen(app, Screen::all().len() - 1),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('D') if app.screen == Screen::Budgets => {
            commands::handle_command("delete-budget", app, wallet)?;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, wallet: &mut Wallet) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, wallet)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, wallet: &mut Wallet) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                commands::apply_pending(action, app, wallet);
            }
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.set_status("Cancelled");
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
}

// ── Navigation helpers ───────────────────────────────────────

fn cycle_screen(app: &mut App, step: usize) {
    let screens = Screen::all();
    let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
    app.screen = screens[(idx + step) % screens.len()];
}

/// Rows on the Transactions screen: the longer of the two columns.
fn transaction_rows(wallet: &Wallet) -> usize {
    let incomes = wallet.transactions().iter().filter(|t| t.is_income()).count();
    incomes.max(wallet.transactions().len() - incomes)
}

fn handle_move_down(app: &mut App, wallet: &Wallet) {
    match app.screen {
        Screen::Transactions => {
            if app.transaction_scroll + 1 < transaction_rows(wallet) {
                app.transaction_scroll += 1;
            }
        }
        Screen::Budgets => {
            let page = app.visible_rows;
            scroll_down(
                &mut app.budget_index,
                &mut app.budget_scroll,
                wallet.budgets().len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            app.transaction_scroll = app.transaction_scroll.saturating_sub(1);
        }
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => app.transaction_scroll = 0,
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App, wallet: &Wallet) {
    match app.screen {
        Screen::Transactions => {
            app.transaction_scroll = transaction_rows(wallet).saturating_sub(app.visible_rows);
        }
        Screen::Budgets => {
            let page = app.visible_rows;
            scroll_to_bottom(
                &mut app.budget_index,
                &mut app.budget_scroll,
                wallet.budgets().len(),
                page,
            );
        }
        Screen::Dashboard => {}
    }
}
