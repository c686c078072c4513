// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::event::KeyPress;

/// Single-line text input with a cursor, placeholder, and length cap.
/// Edits are only applied while focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    placeholder: &'static str,
    char_limit: usize,
    focused: bool,
    masked: bool,
}

impl TextInput {
    pub fn new(placeholder: &'static str, char_limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder,
            char_limit,
            focused: false,
            masked: false,
        }
    }

    pub fn masked(placeholder: &'static str, char_limit: usize) -> Self {
        Self {
            masked: true,
            ..Self::new(placeholder, char_limit)
        }
    }

    pub fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().take(self.char_limit).collect();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// What the terminal shows for the current value. Masked inputs echo one
    /// `*` per character.
    pub fn echo(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Apply an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyPress) -> bool {
        if !self.focused {
            return false;
        }
        match *key {
            KeyPress::Char(ch) => {
                if self.value.chars().count() < self.char_limit {
                    let at = self.byte_offset(self.cursor);
                    self.value.insert(at, ch);
                    self.cursor += 1;
                }
                true
            }
            KeyPress::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.value.remove(at);
                    self.cursor -= 1;
                }
                true
            }
            KeyPress::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyPress::Right => {
                if self.cursor < self.value.chars().count() {
                    self.cursor += 1;
                }
                true
            }
            _ => false,
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }
}

/// Move focus to the next field in the group, wrapping at the end. With no
/// field focused, the first field takes focus. At most one field in the
/// group holds focus afterwards.
pub fn advance_focus(fields: &mut [&mut TextInput]) {
    if fields.is_empty() {
        return;
    }
    let current = fields.iter().position(|field| field.is_focused());
    let next = match current {
        Some(index) => {
            fields[index].blur();
            (index + 1) % fields.len()
        }
        None => 0,
    };
    fields[next].focus();
}

pub fn blur_all(fields: &mut [&mut TextInput]) {
    for field in fields {
        field.blur();
    }
}

pub fn any_focused(fields: &[&mut TextInput]) -> bool {
    fields.iter().any(|field| field.is_focused())
}

/// Route an editing key to whichever field holds focus.
pub fn dispatch_key(fields: &mut [&mut TextInput], key: &KeyPress) {
    for field in fields {
        if field.is_focused() {
            field.handle_key(key);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_respects_char_limit() {
        let mut input = TextInput::new("id", 3).focused();
        for ch in "12345".chars() {
            input.handle_key(&KeyPress::Char(ch));
        }
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn backspace_removes_before_cursor() {
        let mut input = TextInput::new("name", 50).focused();
        input.set_value("abc");
        input.handle_key(&KeyPress::Left);
        input.handle_key(&KeyPress::Backspace);
        assert_eq!(input.value(), "ac");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn blurred_input_ignores_keys() {
        let mut input = TextInput::new("name", 50);
        assert!(!input.handle_key(&KeyPress::Char('x')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn masked_echo_hides_value() {
        let mut input = TextInput::masked("password", 50).focused();
        input.set_value("hunter2");
        assert_eq!(input.echo(), "*******");
    }

    #[test]
    fn focus_cycles_through_group() {
        let mut first = TextInput::new("a", 10).focused();
        let mut second = TextInput::new("b", 10);
        let mut third = TextInput::new("c", 10);

        let mut group = [&mut first, &mut second, &mut third];
        for _ in 0..group.len() {
            advance_focus(&mut group);
        }
        assert!(group[0].is_focused());
        assert_eq!(
            group.iter().filter(|field| field.is_focused()).count(),
            1
        );
    }

    #[test]
    fn tab_with_no_focus_picks_first() {
        let mut first = TextInput::new("a", 10);
        let mut second = TextInput::new("b", 10);

        let mut group = [&mut first, &mut second];
        advance_focus(&mut group);
        assert!(group[0].is_focused());
        assert!(!group[1].is_focused());
    }
}
