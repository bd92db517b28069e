use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{
        components::form::{centered_box, render_field},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let login = &state.login;

    let box_width = 46;
    let box_height = if login.register { 9 } else { 7 };
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let title = if login.register {
        " create account "
    } else {
        " sign in "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let mut constraints = vec![Constraint::Length(1); if login.register { 5 } else { 3 }];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let mut row = 0;
    if login.register {
        render_field(
            frame,
            rows[row],
            "Username",
            &login.username,
            false,
            login.focus == LoginField::Username,
            &theme,
        );
        row += 2;
    }
    render_field(
        frame,
        rows[row],
        "Email",
        &login.email,
        false,
        login.focus == LoginField::Email,
        &theme,
    );
    row += 2;
    render_field(
        frame,
        rows[row],
        "Password",
        &login.password,
        true,
        login.focus == LoginField::Password,
        &theme,
    );

    // Error message below the box (only shown when there's one)
    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x.saturating_sub(8),
            y: card_area.y + card_area.height,
            width: card_area.width + 16,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }

    let hint = if login.register {
        "Tab next · Enter create · Ctrl+R sign in instead · Esc quit"
    } else {
        "Tab next · Enter sign in · Ctrl+R create account · Esc quit"
    };
    let hint_area = Rect {
        x: card_area.x.saturating_sub(8),
        y: card_area.y + card_area.height + 2,
        width: card_area.width + 16,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.dim)))
            .alignment(Alignment::Center),
        hint_area,
    );
}
