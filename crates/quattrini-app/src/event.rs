// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{Category, Transaction};
use quattrini_logs::LogEntry;
use time::{Date, OffsetDateTime};

/// Decoded key press, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
    Char(char),
    Ctrl(char),
}

/// Everything the state machine reacts to. Input, timer ticks, terminal
/// resizes, and completions posted back by worker threads all flow through
/// one queue and are applied strictly in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyPress),
    Tick(OffsetDateTime),
    Resize { width: u16, height: u16 },
    Api(ApiOutcome),
    LogsRefreshed(Vec<LogEntry>),
}

/// Side effects requested by the state machine. `advance` never performs
/// I/O itself; the runtime executes these.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Api(ApiCall),
    RefreshLogs,
    ClearLogs,
}

/// One variant per remote operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login { email: String, password: String },
    Register { email: String, password: String },
    ListCategories,
    CreateCategory { name: String },
    DeleteCategory { id: i64 },
    ListTransactions,
    SearchTransactions { name: String },
    CreateTransaction(NewTransaction),
    DeleteTransaction { id: i64 },
}

/// Validated payload for a transaction create call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub name: String,
    pub cost: f64,
    pub date: Date,
    pub category_id: i64,
}

/// Completion of an `ApiCall`, posted back onto the event queue.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    LoggedIn(Result<String, RemoteError>),
    Registered(Result<(), RemoteError>),
    Categories(Result<Vec<Category>, RemoteError>),
    CategorySaved(Result<(), RemoteError>),
    CategoryRemoved(Result<(), RemoteError>),
    Transactions(Result<Vec<Transaction>, RemoteError>),
    TransactionsFiltered(Result<Vec<Transaction>, RemoteError>),
    TransactionSaved(Result<(), RemoteError>),
    TransactionRemoved(Result<(), RemoteError>),
}

/// Failure taxonomy for remote calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("connection failed: {0}")]
    Transport(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}
