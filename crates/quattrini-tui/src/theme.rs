// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use ratatui::style::{Color, Modifier, Style};

/// Style bundle built once at startup and passed to the renderer by
/// reference. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub normal: Style,
    pub dim: Style,
    pub selected: Style,
    pub table_header: Style,
    pub success: Style,
    pub error: Style,
    pub badge: Style,
}

impl Theme {
    pub fn dark() -> Self {
        let accent = Color::Rgb(0xfc, 0x59, 0x5f);
        Self {
            title: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            normal: Style::default(),
            dim: Style::default().fg(Color::DarkGray),
            selected: Style::default().fg(accent).bg(Color::Rgb(0x25, 0x25, 0x25)),
            table_header: Style::default().add_modifier(Modifier::UNDERLINED),
            success: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red),
            badge: Style::default().fg(Color::Yellow),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
