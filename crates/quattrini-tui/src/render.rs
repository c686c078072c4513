// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::theme::Theme;
use quattrini_app::{
    AuthForm, AuthMode, CategoryMode, FilterForm, LogViewport, MenuEntry, Model, Screen, TextInput,
    TransactionForm, TransactionMode,
};
use ratatui::text::{Line, Span, Text};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const CLOCK_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const DAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Build the full frame for the current state. Pure: the same model and
/// theme always produce the same text.
pub fn render(model: &Model, theme: &Theme) -> Text<'static> {
    let mut lines = match &model.screen {
        Screen::Menu { selected } => menu_lines(model, *selected, theme),
        Screen::Logs { viewport } => log_lines(viewport, theme),
        Screen::Auth {
            mode,
            form,
            message,
        } => auth_lines(*mode, form, message, theme),
        Screen::Categories {
            mode,
            cursor,
            message,
        } => category_lines(model, mode, *cursor, message, theme),
        Screen::Transactions {
            mode,
            cursor,
            message,
        } => transaction_lines(model, mode, *cursor, message, theme),
    };
    lines.push(Line::default());
    lines.push(help_line(model, theme));
    Text::from(lines)
}

fn menu_lines(model: &Model, selected: usize, theme: &Theme) -> Vec<Line<'static>> {
    let badge = if model.session.logged_in {
        "logged in"
    } else {
        "logged out"
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Personal Finance Tracker", theme.title),
            Span::raw("  "),
            Span::styled(format!("[{badge}]"), theme.badge),
        ]),
        Line::default(),
    ];

    for (index, entry) in MenuEntry::ALL.iter().enumerate() {
        if index == selected {
            lines.push(Line::styled(format!("> {}", entry.title()), theme.selected));
            lines.push(Line::styled(
                format!("    {}", entry.description()),
                theme.dim,
            ));
        } else {
            lines.push(Line::styled(format!("  {}", entry.title()), theme.normal));
        }
    }
    lines
}

fn log_lines(viewport: &LogViewport, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(
            format!("Logs ({} entries)", viewport.entries().len()),
            theme.title,
        ),
        Line::default(),
    ];

    if viewport.entries().is_empty() {
        lines.push(Line::styled("No logs captured yet.".to_owned(), theme.dim));
    }
    for entry in viewport.visible() {
        let clock = entry
            .timestamp
            .format(CLOCK_FORMAT)
            .unwrap_or_else(|_| "--:--:--".to_owned());
        lines.push(Line::from(vec![
            Span::styled(format!("{clock} "), theme.dim),
            Span::styled(format!("[{}] ", entry.level.as_str()), theme.badge),
            Span::styled(entry.message.clone(), theme.normal),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        format!("{:>3}%", viewport.percent()),
        theme.dim,
    ));
    lines
}

fn auth_lines(
    mode: AuthMode,
    form: &AuthForm,
    message: &str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(mode.title().to_owned(), theme.title),
        Line::default(),
        Line::styled("Email".to_owned(), theme.normal),
        input_line(&form.email, theme),
        Line::styled("Password".to_owned(), theme.normal),
        input_line(&form.password, theme),
    ];
    push_message(&mut lines, message, theme);
    lines
}

fn category_lines(
    model: &Model,
    mode: &CategoryMode,
    cursor: usize,
    message: &str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled("Categories".to_owned(), theme.title), Line::default()];

    match mode {
        CategoryMode::View => {
            if model.categories.is_empty() {
                lines.push(Line::styled(
                    "No categories found. Press 'a' to add a category.".to_owned(),
                    theme.dim,
                ));
            } else {
                lines.push(Line::styled(
                    format!("{:<5} {:<15}", "ID", "Name"),
                    theme.table_header,
                ));
                for (index, category) in model.categories.iter().enumerate() {
                    let style = if index == cursor {
                        theme.selected
                    } else {
                        theme.normal
                    };
                    lines.push(Line::styled(
                        format!("{:<5} {:<15}", category.id, category.name),
                        style,
                    ));
                }
            }
        }
        CategoryMode::Add { name } => {
            lines.push(Line::styled("Add a category".to_owned(), theme.normal));
            lines.push(input_line(name, theme));
        }
        CategoryMode::Delete { id } => {
            lines.push(Line::styled("Delete a category".to_owned(), theme.normal));
            lines.push(input_line(id, theme));
        }
    }
    push_message(&mut lines, message, theme);
    lines
}

fn transaction_lines(
    model: &Model,
    mode: &TransactionMode,
    cursor: usize,
    message: &str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled("Transactions".to_owned(), theme.title),
        Line::default(),
    ];

    match mode {
        TransactionMode::View => {
            if model.filtered.is_empty() {
                lines.push(Line::styled(
                    "No transactions found. Press 'a' to add a transaction.".to_owned(),
                    theme.dim,
                ));
            } else {
                lines.push(Line::styled(
                    format!(
                        "{:<8} {:<20} {:<10} {:<15} {:<10}",
                        "ID", "Name", "Cost", "Date", "CategoryID"
                    ),
                    theme.table_header,
                ));
                for (index, transaction) in model.filtered.iter().enumerate() {
                    let style = if index == cursor {
                        theme.selected
                    } else {
                        theme.normal
                    };
                    let day = transaction
                        .date
                        .date()
                        .format(DAY_FORMAT)
                        .unwrap_or_else(|_| transaction.date.date().to_string());
                    lines.push(Line::styled(
                        format!(
                            "{:<8} {:<20} {:<10.2} {:<15} {:<10}",
                            transaction.id,
                            transaction.name,
                            transaction.cost,
                            day,
                            transaction.category_id
                        ),
                        style,
                    ));
                }
            }
        }
        TransactionMode::Add { form } => lines.extend(transaction_form_lines(form, theme)),
        TransactionMode::Delete { id } => {
            lines.push(Line::styled("Delete a transaction".to_owned(), theme.normal));
            lines.push(input_line(id, theme));
        }
        TransactionMode::Filter { form } => lines.extend(filter_form_lines(form, theme)),
    }
    push_message(&mut lines, message, theme);
    lines
}

fn transaction_form_lines(form: &TransactionForm, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::styled("Add a transaction".to_owned(), theme.normal),
        Line::styled("Name".to_owned(), theme.normal),
        input_line(&form.name, theme),
        Line::styled("Cost".to_owned(), theme.normal),
        input_line(&form.cost, theme),
        Line::styled("Date".to_owned(), theme.normal),
        input_line(&form.date, theme),
        Line::styled("Category ID".to_owned(), theme.normal),
        input_line(&form.category_id, theme),
    ]
}

fn filter_form_lines(form: &FilterForm, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::styled("Filter transactions".to_owned(), theme.normal),
        Line::styled("Name".to_owned(), theme.normal),
        input_line(&form.name, theme),
        Line::styled("From".to_owned(), theme.normal),
        input_line(&form.date_from, theme),
        Line::styled("To".to_owned(), theme.normal),
        input_line(&form.date_to, theme),
    ]
}

fn input_line(input: &TextInput, theme: &Theme) -> Line<'static> {
    let echo = input.echo();
    if input.is_focused() {
        let mut shown = String::new();
        for (index, ch) in echo.chars().enumerate() {
            if index == input.cursor() {
                shown.push('█');
            }
            shown.push(ch);
        }
        if input.cursor() >= echo.chars().count() {
            shown.push('█');
        }
        Line::styled(format!("> {shown}"), theme.selected)
    } else if echo.is_empty() {
        Line::styled(format!("  {}", input.placeholder()), theme.dim)
    } else {
        Line::styled(format!("  {echo}"), theme.normal)
    }
}

/// Status messages use the success style iff the text says so.
fn push_message(lines: &mut Vec<Line<'static>>, message: &str, theme: &Theme) {
    if message.is_empty() {
        return;
    }
    let style = if message.contains("successful") {
        theme.success
    } else {
        theme.error
    };
    lines.push(Line::default());
    lines.push(Line::styled(message.to_owned(), style));
}

fn help_line(model: &Model, theme: &Theme) -> Line<'static> {
    let short = match &model.screen {
        Screen::Menu { .. } => "↑/k up · ↓/j down · enter select · ? help · q quit",
        Screen::Logs { .. } => "↑/k up · ↓/j down · c clear · esc back · ? help",
        Screen::Auth { .. } => "tab next field · ctrl+r toggle mode · enter submit · esc back",
        Screen::Categories { .. } | Screen::Transactions { .. } => {
            "ctrl+a add · ctrl+d delete · r refresh · esc back · ? help"
        }
    };
    let expanded = match &model.screen {
        Screen::Menu { .. } => "↑/k up · ↓/j down · enter select · ? help · q/ctrl+c quit",
        Screen::Logs { .. } => {
            "↑/k scroll up · ↓/j scroll down · c clear logs · esc/backspace back · ? help · q quit"
        }
        Screen::Auth { .. } => {
            "tab next field · ctrl+r toggle login/register · enter submit · esc back · ctrl+c quit"
        }
        Screen::Categories { .. } => {
            "↑/k up · ↓/j down · ctrl+a add · ctrl+d delete · r refresh · esc/backspace back · ? help · q quit"
        }
        Screen::Transactions { .. } => {
            "↑/k up · ↓/j down · ctrl+a add · ctrl+d delete · ctrl+f filter · r refresh · esc/backspace back · ? help · q quit"
        }
    };
    let text = if model.show_help { expanded } else { short };
    Line::styled(text.to_owned(), theme.dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quattrini_app::{Category, Session, Transaction};
    use time::macros::datetime;

    fn transactions_model() -> Model {
        let mut model = Model::new();
        model.session = Session {
            token: "tok1".to_owned(),
            logged_in: true,
        };
        model.transactions = vec![Transaction {
            id: 1,
            name: "Coffee".to_owned(),
            cost: 3.5,
            date: datetime!(2026 - 03 - 05 0:00 UTC),
            category_id: 2,
        }];
        model.filtered = model.transactions.clone();
        model.screen = Screen::Transactions {
            mode: TransactionMode::View,
            cursor: 0,
            message: String::new(),
        };
        model
    }

    fn flatten(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn rendering_is_pure() {
        let theme = Theme::dark();
        let model = transactions_model();
        assert_eq!(render(&model, &theme), render(&model, &theme));
    }

    #[test]
    fn menu_shows_selection_and_login_badge() {
        let theme = Theme::dark();
        let model = Model::new();
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("> View Logs"));
        assert!(frame.contains("View application logs"));
        assert!(frame.contains("[logged out]"));
    }

    #[test]
    fn transaction_table_formats_rows() {
        let theme = Theme::dark();
        let model = transactions_model();
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("Coffee"));
        assert!(frame.contains("2026-03-05"));
        assert!(frame.contains("3.50"));
    }

    #[test]
    fn empty_transaction_list_shows_the_hint() {
        let theme = Theme::dark();
        let mut model = transactions_model();
        model.filtered.clear();
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("No transactions found. Press 'a' to add a transaction."));
    }

    #[test]
    fn empty_category_list_shows_the_hint() {
        let theme = Theme::dark();
        let mut model = Model::new();
        model.screen = Screen::Categories {
            mode: CategoryMode::View,
            cursor: 0,
            message: String::new(),
        };
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("No categories found. Press 'a' to add a category."));
    }

    #[test]
    fn category_table_lists_rows() {
        let theme = Theme::dark();
        let mut model = Model::new();
        model.categories = vec![Category {
            id: 4,
            name: "Rent".to_owned(),
        }];
        model.screen = Screen::Categories {
            mode: CategoryMode::View,
            cursor: 0,
            message: String::new(),
        };
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("Rent"));
        assert!(frame.contains("ID"));
    }

    #[test]
    fn password_echo_is_masked() {
        let theme = Theme::dark();
        let mut model = Model::new();
        let mut form = AuthForm::new();
        form.password.set_value("hunter2");
        model.screen = Screen::Auth {
            mode: AuthMode::Login,
            form,
            message: String::new(),
        };
        let frame = flatten(&render(&model, &theme));
        assert!(frame.contains("*******"));
        assert!(!frame.contains("hunter2"));
    }

    #[test]
    fn message_styling_follows_the_success_convention() {
        let theme = Theme::dark();
        let mut model = Model::new();
        model.screen = Screen::Auth {
            mode: AuthMode::Login,
            form: AuthForm::new(),
            message: "Login successful!".to_owned(),
        };
        let text = render(&model, &theme);
        let line = text
            .lines
            .iter()
            .find(|line| flatten_line(line) == "Login successful!")
            .expect("message line should render");
        assert_eq!(line.style, theme.success);

        if let Screen::Auth { message, .. } = &mut model.screen {
            *message = "Error: server returned status 401".to_owned();
        }
        let text = render(&model, &theme);
        let line = text
            .lines
            .iter()
            .find(|line| flatten_line(line).starts_with("Error:"))
            .expect("message line should render");
        assert_eq!(line.style, theme.error);
    }

    #[test]
    fn help_footer_expands_with_the_toggle() {
        let theme = Theme::dark();
        let mut model = Model::new();
        let short = flatten(&render(&model, &theme));
        model.show_help = true;
        let expanded = flatten(&render(&model, &theme));
        assert!(expanded.len() > short.len());
        assert!(expanded.contains("ctrl+c"));
    }

    fn flatten_line(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }
}
