use crate::models::Budget;
use crate::store::SaveStatus;
use crate::wallet::Wallet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transactions, Self::Budgets]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteBudget { id: String, name: String },
    RemoveSaving { budget_id: String, month: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Transactions
    pub(crate) transaction_scroll: usize,

    // Budgets
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            transaction_scroll: 0,

            budget_index: 0,
            budget_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Status line describing how the stores came up, if anything was lost.
    pub(crate) fn report_load(&mut self, wallet: &Wallet) {
        let report = wallet.load_report();
        let lost: Vec<&str> = [
            ("transactions", report.transactions.lost_data()),
            ("budgets", report.budgets.lost_data()),
        ]
        .iter()
        .filter(|(_, lost)| *lost)
        .map(|(name, _)| *name)
        .collect();
        if !lost.is_empty() {
            self.set_status(format!(
                "Saved {} could not be read; starting empty",
                lost.join(" and ")
            ));
        }
    }

    pub(crate) fn selected_budget<'a>(&self, wallet: &'a Wallet) -> Option<&'a Budget> {
        wallet.budgets().get(self.budget_index)
    }

    /// Keep the budget cursor inside the list after removals.
    pub(crate) fn clamp_budget_index(&mut self, len: usize) {
        if self.budget_index >= len {
            self.budget_index = len.saturating_sub(1);
        }
        if self.budget_scroll > self.budget_index {
            self.budget_scroll = self.budget_index;
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Status for a completed mutation, noting when the write did not land.
    pub(crate) fn set_saved_status(&mut self, msg: impl Into<String>, status: SaveStatus) {
        let msg = msg.into();
        match status {
            SaveStatus::Saved => self.set_status(msg),
            SaveStatus::Failed => self.set_status(format!("{msg} (not saved to disk)")),
            SaveStatus::Skipped => self.set_status("Nothing changed"),
        }
    }
}
