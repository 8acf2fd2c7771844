use anyhow::Result;
use chrono::NaiveDate;

use crate::form::{BudgetForm, EditMode, Submitted, TransactionForm};
use crate::ledger::Books;
use crate::models::{catalog, Month, Transaction, TransactionId, TransactionType};
use crate::report;
use crate::session::Session;
use crate::ui::util::{clamp_cursor, format_ugx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Add,
    Transactions,
    Reports,
    Budget,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Add,
            Self::Transactions,
            Self::Reports,
            Self::Budget,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Add => write!(f, "Add"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Reports => write!(f, "Reports"),
            Self::Budget => write!(f, "Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: TransactionId, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Type,
    Category,
    Amount,
    Description,
    Date,
}

impl FormField {
    pub(crate) fn all() -> &'static [FormField] {
        &[
            Self::Type,
            Self::Category,
            Self::Amount,
            Self::Description,
            Self::Date,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Category => "Category",
            Self::Amount => "Amount (UGX)",
            Self::Description => "Description",
            Self::Date => "Date",
        }
    }

    fn step(&self, delta: isize) -> Self {
        let fields = Self::all();
        let idx = fields.iter().position(|f| f == self).unwrap_or(0) as isize;
        let len = fields.len() as isize;
        fields[(idx + delta).rem_euclid(len) as usize]
    }
}

/// What keystrokes go into while in `InputMode::Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditTarget {
    Form,
    BudgetAmount,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) today: NaiveDate,
    /// Month shown on the Reports and Budget screens.
    pub(crate) selected_month: Month,

    // Add / edit form
    pub(crate) form: TransactionForm,
    pub(crate) form_field: FormField,
    pub(crate) edit_mode: EditMode,
    pub(crate) edit_target: EditTarget,

    // Transactions
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Budget
    pub(crate) budget_index: usize,
    pub(crate) budget_input: String,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            today,
            selected_month: Month::of(today),

            form: TransactionForm::blank(today),
            form_field: FormField::Type,
            edit_mode: EditMode::Idle,
            edit_target: EditTarget::Form,

            transaction_index: 0,
            transaction_scroll: 0,

            budget_index: 0,
            budget_input: String::new(),

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── Form ──────────────────────────────────────────────────

    pub(crate) fn reset_form(&mut self) {
        self.form = TransactionForm::blank(self.today);
        self.form_field = FormField::Type;
        self.edit_mode.cancel();
    }

    pub(crate) fn next_field(&mut self) {
        self.form_field = self.form_field.step(1);
    }

    pub(crate) fn prev_field(&mut self) {
        self.form_field = self.form_field.step(-1);
    }

    /// The raw text buffer behind the focused field, if it is free text.
    pub(crate) fn field_buffer_mut(&mut self) -> Option<&mut String> {
        match self.form_field {
            FormField::Type => None,
            FormField::Category => Some(&mut self.form.category),
            FormField::Amount => Some(&mut self.form.amount),
            FormField::Description => Some(&mut self.form.description),
            FormField::Date => Some(&mut self.form.date),
        }
    }

    /// Switch the form's type. A category from the other type's catalog is
    /// cleared so it cannot be submitted by accident.
    pub(crate) fn set_kind(&mut self, kind: TransactionType) {
        if self.form.kind == kind {
            return;
        }
        self.form.kind = kind;
        if catalog::find(kind.toggled(), &self.form.category).is_some() {
            self.form.category.clear();
        }
    }

    pub(crate) fn toggle_kind(&mut self) {
        self.set_kind(self.form.kind.toggled());
    }

    /// Step through the catalog categories for the form's current type.
    pub(crate) fn cycle_category(&mut self, delta: isize) {
        let options = catalog::categories_for(self.form.kind);
        if options.is_empty() {
            return;
        }
        let len = options.len() as isize;
        let next = match options.iter().position(|c| *c == self.form.category) {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.form.category = options[next as usize].to_string();
    }

    /// Load `txn` into the form and switch to the Add screen in edit mode.
    pub(crate) fn begin_edit(&mut self, txn: &Transaction) {
        self.form = TransactionForm::from_transaction(txn);
        self.form_field = FormField::Type;
        self.edit_mode.begin_edit(txn.id);
        self.screen = Screen::Add;
        self.set_status(format!("Editing {} · {}", txn.category, txn.date));
    }

    pub(crate) fn cancel_edit(&mut self) {
        if self.edit_mode.is_editing() {
            self.reset_form();
            self.set_status("Edit cancelled");
        } else {
            self.reset_form();
            self.set_status("Form cleared");
        }
    }

    /// Add or update from the form and flush the books.
    /// A rejected form is reported in the status bar and left as typed.
    pub(crate) fn submit_form(&mut self, session: &mut Session) -> Result<()> {
        let kind = self.form.kind;
        match self
            .edit_mode
            .submit(&self.form, &mut session.books.transactions)
        {
            Ok(Submitted::Added(id)) => {
                session.commit()?;
                let amount = session
                    .books
                    .transactions
                    .get(id)
                    .map(|t| format_ugx(t.amount))
                    .unwrap_or_default();
                self.reset_form();
                self.set_status(format!("Added {kind}: {amount}"));
            }
            Ok(Submitted::Updated(_)) => {
                session.commit()?;
                self.reset_form();
                self.screen = Screen::Transactions;
                self.set_status("Transaction updated");
            }
            Ok(Submitted::Missing(_)) => {
                self.reset_form();
                self.set_status("That transaction no longer exists; nothing saved");
            }
            Err(rejection) => self.set_status(rejection.to_string()),
        }
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn selected_transaction<'a>(&self, books: &'a Books) -> Option<&'a Transaction> {
        books.transactions.all().get(self.transaction_index)
    }

    pub(crate) fn request_delete(&mut self, books: &Books) {
        let Some(txn) = self.selected_transaction(books) else {
            self.set_status("No transaction selected");
            return;
        };
        let label = format!("{} {} ({})", txn.category, format_ugx(txn.amount), txn.date);
        self.confirm_message = format!("Delete {label}?");
        self.pending_action = Some(PendingAction::DeleteTransaction { id: txn.id, label });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self, session: &mut Session) -> Result<()> {
        if let Some(action) = self.pending_action.take() {
            match action {
                PendingAction::DeleteTransaction { id, label } => {
                    if session.books.transactions.remove(id) {
                        session.commit()?;
                        if self.edit_mode == EditMode::Editing(id) {
                            self.reset_form();
                        }
                        self.set_status(format!("Deleted: {label}"));
                    } else {
                        self.set_status("Transaction already gone");
                    }
                    clamp_cursor(
                        &mut self.transaction_index,
                        &mut self.transaction_scroll,
                        session.books.transactions.len(),
                    );
                }
            }
        }
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    // ── Budget ────────────────────────────────────────────────

    /// Category under the Budget screen cursor.
    pub(crate) fn selected_budget_category(&self, books: &Books) -> Option<String> {
        budget_categories(books, self.selected_month)
            .into_iter()
            .nth(self.budget_index)
    }

    /// Set a ceiling for the selected month. Rejections go to the status bar.
    pub(crate) fn set_budget(
        &mut self,
        session: &mut Session,
        category: &str,
        amount: &str,
    ) -> Result<()> {
        let form = BudgetForm {
            month: self.selected_month.to_string(),
            category: catalog::find(TransactionType::Expense, category)
                .map(str::to_string)
                .unwrap_or_else(|| category.to_string()),
            amount: amount.to_string(),
        };
        let parsed = form.parse().and_then(|(month, category, amount)| {
            session
                .books
                .budgets
                .set(month, &category, amount)
                .map(|()| (month, category, amount))
        });
        match parsed {
            Ok((month, category, amount)) => {
                session.commit()?;
                self.set_status(format!(
                    "Budget for {category} in {month}: {}",
                    format_ugx(amount)
                ));
            }
            Err(rejection) => self.set_status(rejection.to_string()),
        }
        Ok(())
    }

    pub(crate) fn shift_month(&mut self, forward: bool) {
        self.selected_month = if forward {
            self.selected_month.next()
        } else {
            self.selected_month.prev()
        };
        self.budget_index = 0;
        self.set_status(format!("Month: {}", self.selected_month));
    }
}

/// Rows of the Budget screen: every catalog expense category, then any
/// other category that has a ceiling this month.
pub(crate) fn budget_categories(books: &Books, month: Month) -> Vec<String> {
    let mut rows: Vec<String> = catalog::all_expense_categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    for (category, _) in report::budget_overview(books.transactions.all(), &books.budgets, month) {
        if !rows.contains(&category) {
            rows.push(category);
        }
    }
    rows
}
