use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::session::Session;
use crate::ui::app::{budget_categories, App, EditTarget, FormField, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{clamp_cursor, scroll_down, scroll_up};

pub(crate) fn as_tui(session: &mut Session) -> Result<()> {
    let mut app = App::new(Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, session);

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
    session: &mut Session,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, borders and a header row
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, &session.books);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, session)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, session),
        InputMode::Command => handle_command_input(key, app, session),
        InputMode::Editing => handle_editing_input(key, app, session),
        InputMode::Confirm => handle_confirm_input(key, app, session),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(c @ '1'..='5') => {
            let idx = c as usize - '1' as usize;
            switch_screen(app, session, Screen::all()[idx]);
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, session, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, session, screens[prev]);
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app, session)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, session)?,
        _ => match app.screen {
            Screen::Add => handle_form_key(key, app, session)?,
            Screen::Transactions => handle_transactions_key(key, app, session)?,
            Screen::Budget => handle_budget_key(key, app, session),
            Screen::Dashboard | Screen::Reports => {
                if key.code == KeyCode::Esc {
                    app.status_message.clear();
                }
            }
        },
    }
    Ok(())
}

fn handle_form_key(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_field(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_field(),
        KeyCode::Enter => {
            if app.form_field == FormField::Type {
                app.toggle_kind();
            } else {
                app.edit_target = EditTarget::Form;
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            adjust_field(app, 1)
        }
        KeyCode::Char('-') | KeyCode::Left => adjust_field(app, -1),
        KeyCode::Char('s') => app.submit_form(session)?,
        KeyCode::Esc => app.cancel_edit(),
        _ => {}
    }
    Ok(())
}

fn adjust_field(app: &mut App, delta: isize) {
    match app.form_field {
        FormField::Type => app.toggle_kind(),
        FormField::Category => app.cycle_category(delta),
        _ => {}
    }
}

fn handle_transactions_key(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    let len = session.books.transactions.len();
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll)
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
            }
        }
        KeyCode::Char('g') => {
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        KeyCode::Char('G') => {
            if len > 0 {
                app.transaction_index = len - 1;
                app.transaction_scroll = app.transaction_index.saturating_sub(page - 1);
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => commands::handle_command("edit", app, session)?,
        KeyCode::Char('D') => commands::handle_command("delete-txn", app, session)?,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_budget_key(key: KeyEvent, app: &mut App, session: &Session) {
    let len = budget_categories(&session.books, app.selected_month).len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.budget_index + 1 < len {
                app.budget_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.budget_index = app.budget_index.saturating_sub(1);
        }
        KeyCode::Char('g') => app.budget_index = 0,
        KeyCode::Char('G') => app.budget_index = len.saturating_sub(1),
        KeyCode::Enter => {
            if let Some(category) = app.selected_budget_category(&session.books) {
                app.budget_input = session
                    .books
                    .budgets
                    .get(app.selected_month, &category)
                    .map(|amount| amount.normalize().to_string())
                    .unwrap_or_default();
                app.edit_target = EditTarget::BudgetAmount;
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_command_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, session)?;
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
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match app.edit_target {
        EditTarget::Form => {
            match key.code {
                KeyCode::Enter | KeyCode::Tab => {
                    app.input_mode = InputMode::Normal;
                    app.next_field();
                }
                KeyCode::Esc => app.input_mode = InputMode::Normal,
                KeyCode::Backspace => {
                    if let Some(buf) = app.field_buffer_mut() {
                        buf.pop();
                    }
                }
                KeyCode::Char(c) => match app.field_buffer_mut() {
                    Some(buf) => buf.push(c),
                    None => app.input_mode = InputMode::Normal,
                },
                _ => {}
            }
            Ok(())
        }
        EditTarget::BudgetAmount => {
            match key.code {
                KeyCode::Enter => {
                    app.input_mode = InputMode::Normal;
                    if let Some(category) = app.selected_budget_category(&session.books) {
                        let amount = std::mem::take(&mut app.budget_input);
                        app.set_budget(session, &category, &amount)?;
                    }
                }
                KeyCode::Esc => {
                    app.input_mode = InputMode::Normal;
                    app.budget_input.clear();
                    app.set_status("Budget unchanged");
                }
                KeyCode::Backspace => {
                    app.budget_input.pop();
                }
                KeyCode::Char(c) => app.budget_input.push(c),
                _ => {}
            }
            Ok(())
        }
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, session: &mut Session) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(session)?,
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, session: &Session, screen: Screen) {
    app.screen = screen;
    app.budget_index = 0;
    // The list may have shrunk while on another screen.
    clamp_cursor(
        &mut app.transaction_index,
        &mut app.transaction_scroll,
        session.books.transactions.len(),
    );
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
