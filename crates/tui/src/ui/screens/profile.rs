use api_types::user::UserRole;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use store::{Amount, Store};

use crate::{
    app::{AppState, ProfileField, ProfileMode},
    ui::{
        components::{
            form::{centered_box, render_field},
            money::format_amount,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_card(frame, layout[0], store, &theme);

    if let Some(error) = &store.auth.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }

    if state.profile.mode == ProfileMode::Edit {
        render_edit_form(frame, area, state, &theme);
    }
}

fn render_card(frame: &mut Frame<'_>, area: Rect, store: &Store, theme: &Theme) {
    let block = Block::default()
        .title(" profile ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(user) = &store.auth.user else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Not signed in",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    };

    let role = match user.role {
        UserRole::User => "user",
        UserRole::Admin => "admin",
    };
    let timezone = user.timezone.as_deref().unwrap_or("-");
    let capital = format_amount(
        Amount::from_wire(user.capital),
        Some(user.default_currency.as_str()),
    );

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(
                format!("{label:<18}"),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    };

    let lines = vec![
        row("Username", user.username.clone()),
        row("Email", user.email.clone()),
        row("Default currency", user.default_currency.clone()),
        row("Timezone", timezone.to_string()),
        row("Role", role.to_string()),
        row("Capital", capital),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_edit_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let profile = &state.profile;
    let card_area = centered_box(52, 8, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" edit profile ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Username",
        &profile.username,
        false,
        profile.focus == ProfileField::Username,
        theme,
    );
    render_field(
        frame,
        rows[1],
        "Email",
        &profile.email,
        false,
        profile.focus == ProfileField::Email,
        theme,
    );
    render_field(
        frame,
        rows[2],
        "Currency",
        &profile.currency,
        false,
        profile.focus == ProfileField::Currency,
        theme,
    );

    if let Some(message) = &profile.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[3],
        );
    }
}
