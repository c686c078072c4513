// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::event::{ApiCall, ApiOutcome, Command, Event, KeyPress, NewTransaction};
use crate::forms::AuthForm;
use crate::input;
use crate::model::{
    AuthMode, CategoryMode, LogViewport, Model, Screen, Session, Transaction, TransactionMode,
    log_pane_height, MenuEntry,
};
use time::format_description::BorrowedFormatItem;
use time::{Date, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

impl Model {
    /// Apply one event and return the successor state plus any side effect
    /// the runtime should execute. Pure: no I/O happens here.
    #[must_use]
    pub fn advance(mut self, event: Event) -> (Model, Option<Command>) {
        match event {
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                if let Screen::Logs { viewport } = &mut self.screen {
                    viewport.set_height(log_pane_height(height));
                }
                (self, None)
            }
            Event::Tick(now) => {
                self.last_tick = Some(now);
                let refresh = matches!(self.screen, Screen::Logs { .. });
                (self, refresh.then_some(Command::RefreshLogs))
            }
            Event::LogsRefreshed(entries) => {
                if let Screen::Logs { viewport } = &mut self.screen {
                    viewport.set_entries(entries);
                }
                (self, None)
            }
            Event::Api(outcome) => self.apply_outcome(outcome),
            Event::Key(key) => self.handle_key(key),
        }
    }

    fn handle_key(mut self, key: KeyPress) -> (Model, Option<Command>) {
        if key == KeyPress::Ctrl('c') {
            return (self, Some(Command::Quit));
        }
        let screen = std::mem::replace(&mut self.screen, Screen::menu());
        match screen {
            Screen::Menu { selected } => self.menu_key(selected, key),
            Screen::Logs { viewport } => self.logs_key(viewport, key),
            Screen::Auth {
                mode,
                form,
                message,
            } => self.auth_key(mode, form, message, key),
            Screen::Categories {
                mode,
                cursor,
                message,
            } => self.category_key(mode, cursor, message, key),
            Screen::Transactions {
                mode,
                cursor,
                message,
            } => self.transaction_key(mode, cursor, message, key),
        }
    }

    fn menu_key(mut self, mut selected: usize, key: KeyPress) -> (Model, Option<Command>) {
        let mut command = None;
        match key {
            KeyPress::Up | KeyPress::Char('k') => selected = selected.saturating_sub(1),
            KeyPress::Down | KeyPress::Char('j') => {
                if selected + 1 < MenuEntry::ALL.len() {
                    selected += 1;
                }
            }
            KeyPress::Char('?') => self.show_help = !self.show_help,
            KeyPress::Char('q') => command = Some(Command::Quit),
            KeyPress::Enter => match MenuEntry::ALL[selected] {
                MenuEntry::Logs => {
                    self.screen = Screen::Logs {
                        viewport: LogViewport::new(log_pane_height(self.height)),
                    };
                    return (self, Some(Command::RefreshLogs));
                }
                MenuEntry::Auth => {
                    self.screen = Screen::Auth {
                        mode: AuthMode::Login,
                        form: AuthForm::new(),
                        message: String::new(),
                    };
                    return (self, None);
                }
                MenuEntry::Categories if self.session.logged_in => {
                    self.screen = Screen::Categories {
                        mode: CategoryMode::View,
                        cursor: 0,
                        message: String::new(),
                    };
                    return (self, Some(Command::Api(ApiCall::ListCategories)));
                }
                MenuEntry::Transactions if self.session.logged_in => {
                    self.screen = Screen::Transactions {
                        mode: TransactionMode::View,
                        cursor: 0,
                        message: String::new(),
                    };
                    return (self, Some(Command::Api(ApiCall::ListTransactions)));
                }
                MenuEntry::Exit => command = Some(Command::Quit),
                // Protected entries are inert while logged out.
                MenuEntry::Categories | MenuEntry::Transactions => {}
            },
            _ => {}
        }
        self.screen = Screen::Menu { selected };
        (self, command)
    }

    fn logs_key(mut self, mut viewport: LogViewport, key: KeyPress) -> (Model, Option<Command>) {
        let mut command = None;
        match key {
            KeyPress::Esc | KeyPress::Backspace => {
                self.screen = Screen::menu();
                return (self, None);
            }
            KeyPress::Up | KeyPress::Char('k') => viewport.scroll_up(),
            KeyPress::Down | KeyPress::Char('j') => viewport.scroll_down(),
            KeyPress::Char('c') => command = Some(Command::ClearLogs),
            KeyPress::Char('?') => self.show_help = !self.show_help,
            KeyPress::Char('q') => command = Some(Command::Quit),
            _ => {}
        }
        self.screen = Screen::Logs { viewport };
        (self, command)
    }

    fn auth_key(
        mut self,
        mut mode: AuthMode,
        mut form: AuthForm,
        mut message: String,
        key: KeyPress,
    ) -> (Model, Option<Command>) {
        let mut command = None;
        match key {
            KeyPress::Esc => {
                self.screen = Screen::menu();
                return (self, None);
            }
            KeyPress::Tab => input::advance_focus(&mut form.fields_mut()),
            KeyPress::Ctrl('r') => {
                mode = mode.toggled();
                message.clear();
            }
            KeyPress::Enter => {
                let email = form.email.value().trim().to_owned();
                let password = form.password.value().to_owned();
                if email.is_empty() || password.is_empty() {
                    message = "Email and password are required".to_owned();
                } else {
                    command = Some(Command::Api(match mode {
                        AuthMode::Login => ApiCall::Login { email, password },
                        AuthMode::Register => ApiCall::Register { email, password },
                    }));
                }
            }
            other => input::dispatch_key(&mut form.fields_mut(), &other),
        }
        self.screen = Screen::Auth {
            mode,
            form,
            message,
        };
        (self, command)
    }

    fn category_key(
        mut self,
        mode: CategoryMode,
        mut cursor: usize,
        mut message: String,
        key: KeyPress,
    ) -> (Model, Option<Command>) {
        let mut command = None;
        let mode = match mode {
            CategoryMode::View => match key {
                KeyPress::Esc | KeyPress::Backspace => {
                    self.screen = Screen::menu();
                    return (self, None);
                }
                KeyPress::Up | KeyPress::Char('k') => {
                    cursor = cursor.saturating_sub(1);
                    CategoryMode::View
                }
                KeyPress::Down | KeyPress::Char('j') => {
                    if cursor + 1 < self.categories.len() {
                        cursor += 1;
                    }
                    CategoryMode::View
                }
                KeyPress::Ctrl('a') => {
                    message.clear();
                    CategoryMode::add()
                }
                KeyPress::Ctrl('d') => {
                    message.clear();
                    CategoryMode::delete()
                }
                KeyPress::Char('r') => {
                    command = Some(Command::Api(ApiCall::ListCategories));
                    CategoryMode::View
                }
                KeyPress::Char('?') => {
                    self.show_help = !self.show_help;
                    CategoryMode::View
                }
                KeyPress::Char('q') => {
                    command = Some(Command::Quit);
                    CategoryMode::View
                }
                _ => CategoryMode::View,
            },
            CategoryMode::Add { mut name } => match key {
                KeyPress::Esc => {
                    if name.is_focused() {
                        name.blur();
                        CategoryMode::Add { name }
                    } else {
                        CategoryMode::View
                    }
                }
                KeyPress::Tab => {
                    input::advance_focus(&mut [&mut name]);
                    CategoryMode::Add { name }
                }
                KeyPress::Enter => {
                    let value = name.value().trim().to_owned();
                    if value.is_empty() {
                        message = "Category name is required".to_owned();
                    } else {
                        command = Some(Command::Api(ApiCall::CreateCategory { name: value }));
                    }
                    CategoryMode::Add { name }
                }
                other => {
                    name.handle_key(&other);
                    CategoryMode::Add { name }
                }
            },
            CategoryMode::Delete { mut id } => match key {
                KeyPress::Esc => {
                    if id.is_focused() {
                        id.blur();
                        CategoryMode::Delete { id }
                    } else {
                        CategoryMode::View
                    }
                }
                KeyPress::Tab => {
                    input::advance_focus(&mut [&mut id]);
                    CategoryMode::Delete { id }
                }
                KeyPress::Enter => {
                    let raw = id.value().trim().to_owned();
                    if raw.is_empty() {
                        message = "Category ID is required".to_owned();
                    } else {
                        match raw.parse::<i64>() {
                            Ok(parsed) => {
                                command = Some(Command::Api(ApiCall::DeleteCategory { id: parsed }));
                            }
                            Err(_) => message = "Invalid category ID".to_owned(),
                        }
                    }
                    CategoryMode::Delete { id }
                }
                other => {
                    id.handle_key(&other);
                    CategoryMode::Delete { id }
                }
            },
        };
        self.screen = Screen::Categories {
            mode,
            cursor,
            message,
        };
        (self, command)
    }

    fn transaction_key(
        mut self,
        mode: TransactionMode,
        mut cursor: usize,
        mut message: String,
        key: KeyPress,
    ) -> (Model, Option<Command>) {
        let mut command = None;
        let mode = match mode {
            TransactionMode::View => match key {
                KeyPress::Esc | KeyPress::Backspace => {
                    self.screen = Screen::menu();
                    return (self, None);
                }
                KeyPress::Up | KeyPress::Char('k') => {
                    cursor = cursor.saturating_sub(1);
                    TransactionMode::View
                }
                KeyPress::Down | KeyPress::Char('j') => {
                    if cursor + 1 < self.filtered.len() {
                        cursor += 1;
                    }
                    TransactionMode::View
                }
                KeyPress::Ctrl('a') => {
                    message.clear();
                    TransactionMode::add()
                }
                KeyPress::Ctrl('d') => {
                    message.clear();
                    TransactionMode::delete()
                }
                KeyPress::Ctrl('f') => {
                    message.clear();
                    TransactionMode::filter()
                }
                KeyPress::Char('r') => {
                    command = Some(Command::Api(ApiCall::ListTransactions));
                    TransactionMode::View
                }
                KeyPress::Char('?') => {
                    self.show_help = !self.show_help;
                    TransactionMode::View
                }
                KeyPress::Char('q') => {
                    command = Some(Command::Quit);
                    TransactionMode::View
                }
                _ => TransactionMode::View,
            },
            TransactionMode::Add { mut form } => match key {
                KeyPress::Esc => {
                    let mut fields = form.fields_mut();
                    if input::any_focused(&fields) {
                        input::blur_all(&mut fields);
                        TransactionMode::Add { form }
                    } else {
                        TransactionMode::View
                    }
                }
                KeyPress::Tab => {
                    input::advance_focus(&mut form.fields_mut());
                    TransactionMode::Add { form }
                }
                KeyPress::Enter => {
                    match validate_new_transaction(&form) {
                        Ok(payload) => {
                            command = Some(Command::Api(ApiCall::CreateTransaction(payload)));
                        }
                        Err(problem) => message = problem.to_owned(),
                    }
                    TransactionMode::Add { form }
                }
                other => {
                    input::dispatch_key(&mut form.fields_mut(), &other);
                    TransactionMode::Add { form }
                }
            },
            TransactionMode::Delete { mut id } => match key {
                KeyPress::Esc => {
                    if id.is_focused() {
                        id.blur();
                        TransactionMode::Delete { id }
                    } else {
                        TransactionMode::View
                    }
                }
                KeyPress::Tab => {
                    input::advance_focus(&mut [&mut id]);
                    TransactionMode::Delete { id }
                }
                KeyPress::Enter => {
                    let raw = id.value().trim().to_owned();
                    if raw.is_empty() {
                        message = "Transaction ID is required".to_owned();
                    } else {
                        match raw.parse::<i64>() {
                            Ok(parsed) => {
                                command =
                                    Some(Command::Api(ApiCall::DeleteTransaction { id: parsed }));
                            }
                            Err(_) => message = "Invalid transaction ID".to_owned(),
                        }
                    }
                    TransactionMode::Delete { id }
                }
                other => {
                    id.handle_key(&other);
                    TransactionMode::Delete { id }
                }
            },
            TransactionMode::Filter { mut form } => match key {
                KeyPress::Esc => {
                    let mut fields = form.fields_mut();
                    if input::any_focused(&fields) {
                        input::blur_all(&mut fields);
                        TransactionMode::Filter { form }
                    } else {
                        TransactionMode::View
                    }
                }
                KeyPress::Tab => {
                    input::advance_focus(&mut form.fields_mut());
                    TransactionMode::Filter { form }
                }
                KeyPress::Enter => {
                    let name = form.name.value().trim().to_owned();
                    let from = form.date_from.value().trim().to_owned();
                    let to = form.date_to.value().trim().to_owned();
                    if !name.is_empty() {
                        command = Some(Command::Api(ApiCall::SearchTransactions { name }));
                    } else if !from.is_empty() || !to.is_empty() {
                        self.filtered = filter_by_date(&self.transactions, &from, &to);
                    } else {
                        self.filtered = self.transactions.clone();
                    }
                    cursor = 0;
                    TransactionMode::View
                }
                other => {
                    input::dispatch_key(&mut form.fields_mut(), &other);
                    TransactionMode::Filter { form }
                }
            },
        };
        self.screen = Screen::Transactions {
            mode,
            cursor,
            message,
        };
        (self, command)
    }

    fn apply_outcome(mut self, outcome: ApiOutcome) -> (Model, Option<Command>) {
        let mut command = None;
        match outcome {
            ApiOutcome::LoggedIn(Ok(token)) => {
                self.session = Session {
                    token,
                    logged_in: true,
                };
                if let Screen::Auth { message, .. } = &mut self.screen {
                    *message = "Login successful!".to_owned();
                }
            }
            ApiOutcome::LoggedIn(Err(error)) => {
                if let Screen::Auth { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::Registered(Ok(())) => {
                if let Screen::Auth { message, .. } = &mut self.screen {
                    *message = "Registration successful!".to_owned();
                }
            }
            ApiOutcome::Registered(Err(error)) => {
                if let Screen::Auth { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::Categories(Ok(list)) => {
                self.categories = list;
                if let Screen::Categories { cursor, .. } = &mut self.screen {
                    *cursor = (*cursor).min(self.categories.len().saturating_sub(1));
                }
            }
            ApiOutcome::Categories(Err(error)) => {
                if let Screen::Categories { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::CategorySaved(Ok(())) => {
                if let Screen::Categories { mode, message, .. } = &mut self.screen {
                    *message = "Category added successfully!".to_owned();
                    if let CategoryMode::Add { name } = mode {
                        name.clear();
                    }
                }
                command = Some(Command::Api(ApiCall::ListCategories));
            }
            ApiOutcome::CategorySaved(Err(error)) => {
                if let Screen::Categories { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::CategoryRemoved(Ok(())) => {
                if let Screen::Categories { mode, message, .. } = &mut self.screen {
                    *message = "Category deleted successfully!".to_owned();
                    *mode = CategoryMode::View;
                }
                command = Some(Command::Api(ApiCall::ListCategories));
            }
            ApiOutcome::CategoryRemoved(Err(error)) => {
                if let Screen::Categories { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::Transactions(Ok(list)) => {
                self.transactions = list.clone();
                self.filtered = list;
                if let Screen::Transactions { cursor, .. } = &mut self.screen {
                    *cursor = (*cursor).min(self.filtered.len().saturating_sub(1));
                }
            }
            ApiOutcome::Transactions(Err(error)) => {
                if let Screen::Transactions { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::TransactionsFiltered(Ok(list)) => {
                self.filtered = list;
                if let Screen::Transactions { cursor, .. } = &mut self.screen {
                    *cursor = (*cursor).min(self.filtered.len().saturating_sub(1));
                }
            }
            ApiOutcome::TransactionsFiltered(Err(_)) => {
                self.filtered.clear();
                if let Screen::Transactions { cursor, .. } = &mut self.screen {
                    *cursor = 0;
                }
            }
            ApiOutcome::TransactionSaved(Ok(())) => {
                if let Screen::Transactions { mode, message, .. } = &mut self.screen {
                    *message = "Transaction added successfully!".to_owned();
                    *mode = TransactionMode::View;
                }
                command = Some(Command::Api(ApiCall::ListTransactions));
            }
            ApiOutcome::TransactionSaved(Err(error)) => {
                if let Screen::Transactions { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
            ApiOutcome::TransactionRemoved(Ok(())) => {
                if let Screen::Transactions { mode, message, .. } = &mut self.screen {
                    *message = "Transaction deleted successfully!".to_owned();
                    *mode = TransactionMode::View;
                }
                command = Some(Command::Api(ApiCall::ListTransactions));
            }
            ApiOutcome::TransactionRemoved(Err(error)) => {
                if let Screen::Transactions { message, .. } = &mut self.screen {
                    *message = format!("Error: {error}");
                }
            }
        }
        (self, command)
    }
}

fn validate_new_transaction(
    form: &crate::forms::TransactionForm,
) -> Result<NewTransaction, &'static str> {
    let name = form.name.value().trim().to_owned();
    let cost = form.cost.value().trim();
    let date = form.date.value().trim();
    let category_id = form.category_id.value().trim();
    if name.is_empty() || cost.is_empty() || date.is_empty() || category_id.is_empty() {
        return Err("All fields are required");
    }
    let cost = cost.parse::<f64>().map_err(|_| "Invalid cost")?;
    let date = Date::parse(date, DATE_FORMAT).map_err(|_| "Invalid date (use YYYY-MM-DD)")?;
    let category_id = category_id
        .parse::<i64>()
        .map_err(|_| "Invalid category ID")?;
    Ok(NewTransaction {
        name,
        cost,
        date,
        category_id,
    })
}

/// Range filter over the loaded transactions. An unparsable bound matches
/// nothing, so the result is empty.
fn filter_by_date(transactions: &[Transaction], from: &str, to: &str) -> Vec<Transaction> {
    let from = match parse_bound(from) {
        Ok(bound) => bound,
        Err(()) => return Vec::new(),
    };
    let to = match parse_bound(to) {
        Ok(bound) => bound,
        Err(()) => return Vec::new(),
    };
    transactions
        .iter()
        .filter(|transaction| {
            let day = transaction.date.date();
            from.is_none_or(|bound| day >= bound) && to.is_none_or(|bound| day <= bound)
        })
        .cloned()
        .collect()
}

fn parse_bound(raw: &str) -> Result<Option<Date>, ()> {
    if raw.is_empty() {
        return Ok(None);
    }
    Date::parse(raw, DATE_FORMAT).map(Some).map_err(|_| ())
}
