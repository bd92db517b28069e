use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};
use store::{Amount, Store};

use crate::{
    app::{AppState, GoalField, GoalsMode},
    ui::{
        components::{
            form::{centered_box, render_field},
            money::{format_amount, inline_progress_bar},
        },
        theme::Theme,
    },
};

const BAR_WIDTH: usize = 14;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Totals header
            Constraint::Length(1), // Inline alert
            Constraint::Min(1),    // Goal list
        ])
        .split(area);

    render_totals(frame, layout[0], store, &theme);

    if let Some(error) = &store.goals.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }

    render_goals(frame, layout[2], state, store, &theme);

    match state.goals.mode {
        GoalsMode::Add => render_add_form(frame, area, state, &theme),
        GoalsMode::Fund => render_fund_form(frame, area, state, &theme),
        GoalsMode::ConfirmDelete => render_confirm(frame, area, state, &theme),
        GoalsMode::List => {}
    }
}

fn currency(store: &Store) -> Option<String> {
    store.auth.user.as_ref().map(|u| u.default_currency.clone())
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, store: &Store, theme: &Theme) {
    let currency = currency(store);
    let currency = currency.as_deref();
    let goals = &store.goals;

    let line = Line::from(vec![
        Span::styled("Saved ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format_amount(goals.total_saved, currency),
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" of ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format_amount(goals.total_target, currency),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            inline_progress_bar(goals.total_saved, goals.total_target, BAR_WIDTH),
            Style::default().fg(theme.accent),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_goals(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    store: &Store,
    theme: &Theme,
) {
    let items = &store.goals.items;
    if items.is_empty() {
        let hint = if store.goals.phase.is_pending() {
            "Loading goals..."
        } else {
            "No goals yet. Press a to create one."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.dim))),
            area,
        );
        return;
    }

    let currency = currency(store);
    let currency = currency.as_deref();

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .take(area.height as usize)
        .map(|(index, goal)| {
            let selected = index == state.goals.selected;
            let marker = if selected { "> " } else { "  " };
            let saved = Amount::from_wire(goal.saved);
            let target = Amount::from_wire(goal.summ);
            let name_style = if selected {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let reached = saved >= target;
            let bar_style = if reached {
                Style::default().fg(theme.positive)
            } else {
                Style::default().fg(theme.accent)
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{:<18}", goal.name), name_style),
                Span::styled(
                    inline_progress_bar(saved, target, BAR_WIDTH),
                    bar_style,
                ),
                Span::raw("  "),
                Span::styled(
                    format_amount(saved, currency),
                    Style::default().fg(theme.positive),
                ),
                Span::styled(" / ", Style::default().fg(theme.text_muted)),
                Span::styled(format_amount(target, currency), Style::default().fg(theme.text)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(rows), area);
}

fn render_add_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.goals.form;
    let card_area = centered_box(46, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" new goal ")
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
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Name",
        &form.name,
        false,
        form.focus == GoalField::Name,
        theme,
    );
    render_field(
        frame,
        rows[1],
        "Target",
        &form.target,
        false,
        form.focus == GoalField::Target,
        theme,
    );

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[2],
        );
    }
}

fn render_fund_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some((_, name)) = &state.goals.fund_goal else {
        return;
    };
    let card_area = centered_box(46, 6, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(format!(" fund \"{name}\" "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    render_field(frame, rows[0], "Amount", &state.goals.fund_amount, false, true, theme);

    if let Some(message) = &state.goals.fund_message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[1],
        );
    }
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some((_, name)) = &state.goals.pending_delete else {
        return;
    };
    let card_area = centered_box(46, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" delete goal ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete \"{name}\"? Saved progress is lost."),
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" delete   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" keep"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
