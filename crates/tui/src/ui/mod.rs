pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use store::Store;

use crate::app::{AppState, DashboardMode, GoalsMode, ProfileMode, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState, store: &Store) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Main => render_shell(frame, area, state, store),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Hint bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, store, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state, store),
        Section::Goals => screens::goals::render(frame, layout[2], state, store),
        Section::Profile => screens::profile::render(frame, layout[2], state, store),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    store: &Store,
    theme: &Theme,
) {
    let user = store
        .auth
        .user
        .as_ref()
        .map(|u| u.username.as_str())
        .unwrap_or("-");
    let currency = store
        .auth
        .user
        .as_ref()
        .map(|u| u.default_currency.as_str())
        .unwrap_or("-");
    let session = store
        .auth
        .access_token
        .as_deref()
        .and_then(store::token_expires_at)
        .map(|expires_at| {
            expires_at
                .with_timezone(&state.timezone)
                .format("%H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string());
    let online = store
        .auth
        .access_token
        .as_deref()
        .is_some_and(|token| !store::token_is_expired(token, Utc::now()));
    let status = if online { "OK" } else { "EXPIRED" };
    let status_style = if online {
        Style::default().fg(theme.positive)
    } else {
        Style::default().fg(theme.error)
    };

    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Currency", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {currency}  ")),
        Span::styled("Session until", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {session}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = vec![
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" section"),
    ];

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("l", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" logout  "));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Context-specific keyboard hints for the current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let accent = Style::default().fg(theme.accent);
    match state.section {
        Section::Dashboard => match state.dashboard.mode {
            DashboardMode::List => vec![
                Span::styled("a", accent),
                Span::raw(" add  "),
                Span::styled("e", accent),
                Span::raw(" edit  "),
                Span::styled("d", accent),
                Span::raw(" delete  "),
                Span::styled("n", accent),
                Span::raw("/"),
                Span::styled("p", accent),
                Span::raw(" page  "),
                Span::styled("r", accent),
                Span::raw(" refresh"),
            ],
            DashboardMode::Add | DashboardMode::Edit => form_hints(theme),
            DashboardMode::ConfirmDelete => confirm_hints(theme),
        },
        Section::Goals => match state.goals.mode {
            GoalsMode::List => vec![
                Span::styled("a", accent),
                Span::raw(" add  "),
                Span::styled("f", accent),
                Span::raw(" fund  "),
                Span::styled("d", accent),
                Span::raw(" delete  "),
                Span::styled("r", accent),
                Span::raw(" refresh"),
            ],
            GoalsMode::Add | GoalsMode::Fund => form_hints(theme),
            GoalsMode::ConfirmDelete => confirm_hints(theme),
        },
        Section::Profile => match state.profile.mode {
            ProfileMode::View => vec![
                Span::styled("e", accent),
                Span::raw(" edit  "),
                Span::styled("r", accent),
                Span::raw(" refresh"),
            ],
            ProfileMode::Edit => form_hints(theme),
        },
    }
}

fn form_hints(theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled("Tab", Style::default().fg(theme.accent)),
        Span::raw(" next  "),
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" save  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" cancel"),
    ]
}

fn confirm_hints(theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::styled("y", Style::default().fg(theme.accent)),
        Span::raw(" confirm  "),
        Span::styled("n", Style::default().fg(theme.accent)),
        Span::raw(" keep"),
    ]
}
