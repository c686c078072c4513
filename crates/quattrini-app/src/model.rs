// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::{AuthForm, FilterForm, TransactionForm};
use crate::input::TextInput;
use quattrini_logs::LogEntry;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    pub cost: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(rename = "categoriesid")]
    pub category_id: i64,
}

/// Bearer token plus a flag the UI gates protected screens on.
/// `logged_in` is only ever set together with a non-empty token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub logged_in: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Logs,
    Auth,
    Categories,
    Transactions,
    Exit,
}

impl MenuEntry {
    pub const ALL: [Self; 5] = [
        Self::Logs,
        Self::Auth,
        Self::Categories,
        Self::Transactions,
        Self::Exit,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Logs => "View Logs",
            Self::Auth => "Login/Register",
            Self::Categories => "Categories",
            Self::Transactions => "Transactions",
            Self::Exit => "Exit",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Logs => "View application logs",
            Self::Auth => "Login or create an account",
            Self::Categories => "Manage your categories",
            Self::Transactions => "Manage your transactions",
            Self::Exit => "Exit the application",
        }
    }

    pub const fn requires_login(self) -> bool {
        matches!(self, Self::Categories | Self::Transactions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryMode {
    View,
    Add { name: TextInput },
    Delete { id: TextInput },
}

impl CategoryMode {
    pub fn add() -> Self {
        Self::Add {
            name: TextInput::new("Enter category name", 50).focused(),
        }
    }

    pub fn delete() -> Self {
        Self::Delete {
            id: TextInput::new("Enter category ID", 10).focused(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionMode {
    View,
    Add { form: TransactionForm },
    Delete { id: TextInput },
    Filter { form: FilterForm },
}

impl TransactionMode {
    pub fn add() -> Self {
        Self::Add {
            form: TransactionForm::new(),
        }
    }

    pub fn delete() -> Self {
        Self::Delete {
            id: TextInput::new("Enter transaction ID", 10).focused(),
        }
    }

    pub fn filter() -> Self {
        Self::Filter {
            form: FilterForm::new(),
        }
    }
}

/// Scroll window over the captured log entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogViewport {
    entries: Vec<LogEntry>,
    scroll: usize,
    height: usize,
}

impl LogViewport {
    pub fn new(height: usize) -> Self {
        Self {
            entries: Vec::new(),
            scroll: 0,
            height: height.max(1),
        }
    }

    pub fn set_entries(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < self.max_scroll() {
            self.scroll += 1;
        }
    }

    pub fn max_scroll(&self) -> usize {
        self.entries.len().saturating_sub(self.height)
    }

    /// Entries inside the current window, oldest first.
    pub fn visible(&self) -> &[LogEntry] {
        let end = (self.scroll + self.height).min(self.entries.len());
        &self.entries[self.scroll.min(end)..end]
    }

    /// Scroll position for the footer, 100 when everything fits.
    pub fn percent(&self) -> u8 {
        let max = self.max_scroll();
        if max == 0 {
            100
        } else {
            (self.scroll * 100 / max) as u8
        }
    }
}

/// One active screen at a time; each variant owns its sub-mode, inputs,
/// and last status message.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu {
        selected: usize,
    },
    Logs {
        viewport: LogViewport,
    },
    Auth {
        mode: AuthMode,
        form: AuthForm,
        message: String,
    },
    Categories {
        mode: CategoryMode,
        cursor: usize,
        message: String,
    },
    Transactions {
        mode: TransactionMode,
        cursor: usize,
        message: String,
    },
}

impl Screen {
    pub fn menu() -> Self {
        Self::Menu { selected: 0 }
    }
}

/// Whole client state. Advanced by value, one event at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub screen: Screen,
    pub session: Session,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    /// Transactions currently shown, after any filter.
    pub filtered: Vec<Transaction>,
    pub show_help: bool,
    pub width: u16,
    pub height: u16,
    pub last_tick: Option<OffsetDateTime>,
}

impl Model {
    pub fn new() -> Self {
        Self {
            screen: Screen::menu(),
            session: Session::default(),
            categories: Vec::new(),
            transactions: Vec::new(),
            filtered: Vec::new(),
            show_help: false,
            width: 80,
            height: 24,
            last_tick: None,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows available to the log pane after the header and footer chrome.
pub fn log_pane_height(terminal_height: u16) -> usize {
    (terminal_height as usize).saturating_sub(4).max(1)
}
