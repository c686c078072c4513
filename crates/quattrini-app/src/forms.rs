// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::input::TextInput;

/// Email/password pair shared by login and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    pub email: TextInput,
    pub password: TextInput,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            email: TextInput::new("Enter your email", 50).focused(),
            password: TextInput::masked("Enter your password", 50),
        }
    }

    pub fn fields_mut(&mut self) -> [&mut TextInput; 2] {
        [&mut self.email, &mut self.password]
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub name: TextInput,
    pub cost: TextInput,
    pub date: TextInput,
    pub category_id: TextInput,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self {
            name: TextInput::new("Enter transaction name", 50).focused(),
            cost: TextInput::new("Enter cost", 20),
            date: TextInput::new("Enter date (YYYY-MM-DD)", 10),
            category_id: TextInput::new("Enter category ID", 10),
        }
    }

    pub fn fields_mut(&mut self) -> [&mut TextInput; 4] {
        [
            &mut self.name,
            &mut self.cost,
            &mut self.date,
            &mut self.category_id,
        ]
    }
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Name query plus an optional client-side date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    pub name: TextInput,
    pub date_from: TextInput,
    pub date_to: TextInput,
}

impl FilterForm {
    pub fn new() -> Self {
        Self {
            name: TextInput::new("Filter by name", 50).focused(),
            date_from: TextInput::new("From date (YYYY-MM-DD)", 10),
            date_to: TextInput::new("To date (YYYY-MM-DD)", 10),
        }
    }

    pub fn fields_mut(&mut self) -> [&mut TextInput; 3] {
        [&mut self.name, &mut self.date_from, &mut self.date_to]
    }
}

impl Default for FilterForm {
    fn default() -> Self {
        Self::new()
    }
}
