use api_types::transaction::TransactionKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
};
use store::{Amount, Store};

use crate::{
    app::{AppState, DashboardMode, PAGE_SIZE},
    ui::{
        components::{
            form::{centered_box, render_field},
            money::{format_amount, styled_balance, styled_kind_amount},
        },
        theme::Theme,
    },
};

/// Category catalogues shown as suggestions under the add/edit form. These
/// mirror what the backend accepts for each kind.
const EXPENSE_CATEGORIES: [&str; 12] = [
    "food",
    "shopping",
    "transportation",
    "travel",
    "health",
    "housing",
    "entertainment",
    "education",
    "beauty",
    "sports",
    "phone",
    "clothing",
];
const INCOME_CATEGORIES: [&str; 5] = ["salary", "freelance", "investment", "gifts", "other"];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, store: &Store) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Balance card
            Constraint::Length(1), // Inline alert
            Constraint::Min(1),    // Transactions
            Constraint::Length(1), // Page footer
        ])
        .split(area);

    render_balance_card(frame, layout[0], store, &theme);

    if let Some(error) = &store.transactions.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[1],
        );
    }

    render_transactions(frame, layout[2], state, store, &theme);
    render_page_footer(frame, layout[3], state, store, &theme);

    match state.dashboard.mode {
        DashboardMode::Add => render_form(frame, area, state, " add transaction ", &theme),
        DashboardMode::Edit => render_form(frame, area, state, " edit transaction ", &theme),
        DashboardMode::ConfirmDelete => render_confirm(frame, area, state, &theme),
        DashboardMode::List => {}
    }
}

fn user_currency(store: &Store) -> Option<String> {
    store.auth.user.as_ref().map(|u| u.default_currency.clone())
}

fn render_balance_card(frame: &mut Frame<'_>, area: Rect, store: &Store, theme: &Theme) {
    let block = Block::default()
        .title(" Homiak Finance ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let currency = user_currency(store);
    let currency = currency.as_deref();
    let totals = store.transactions.totals;

    let lines = vec![
        Line::from(Span::styled(
            "Total Balance",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(styled_balance(store.transactions.balance(), currency, theme)),
        Line::from(vec![
            Span::styled("Income ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("+{}", format_amount(totals.total_income, currency)),
                Style::default().fg(theme.positive),
            ),
            Span::raw("   "),
            Span::styled("Expenses ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("-{}", format_amount(totals.total_expenses, currency)),
                Style::default().fg(theme.negative),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_transactions(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    store: &Store,
    theme: &Theme,
) {
    let items = &store.transactions.items;
    if items.is_empty() {
        let hint = if store.transactions.phase.is_pending() {
            "Loading transactions..."
        } else {
            "No transactions found. Press a to add the first one."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.dim))),
            area,
        );
        return;
    }

    let page = state.dashboard.page();
    let start = page * PAGE_SIZE;
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(start)
        .take(PAGE_SIZE)
        .map(|(index, tx)| {
            let selected = index == state.dashboard.selected;
            let marker = if selected { "> " } else { "  " };
            let date = tx
                .date
                .with_timezone(&state.timezone)
                .format("%d %b %Y")
                .to_string();
            let kind = match tx.kind {
                TransactionKind::Income => "▲",
                TransactionKind::Expense => "▼",
                TransactionKind::Transfer => "⇄",
            };
            let name_style = if selected {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let amount = styled_kind_amount(
                tx.kind,
                Amount::from_wire(tx.amount),
                tx.currency.as_deref(),
                theme,
            );

            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{date:<12}"), Style::default().fg(theme.dim)),
                Span::styled(format!("{kind} "), Style::default().fg(theme.text_muted)),
                Span::styled(format!("{:<16}", tx.category_name), name_style),
                amount,
            ]))
        })
        .collect();

    frame.render_widget(List::new(rows), area);
}

fn render_page_footer(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    store: &Store,
    theme: &Theme,
) {
    let count = store.transactions.items.len();
    if count == 0 {
        return;
    }
    let pages = count.div_ceil(PAGE_SIZE);
    let footer = format!(
        "Page {}/{} · {} transactions",
        state.dashboard.page() + 1,
        pages,
        count
    );
    frame.render_widget(
        Paragraph::new(Span::styled(footer, Style::default().fg(theme.dim))),
        area,
    );
}

fn render_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, title: &str, theme: &Theme) {
    let form = &state.dashboard.form;
    let card_area = centered_box(52, 10, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Currency
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Suggestions
            Constraint::Min(0),    // Message
        ])
        .margin(1)
        .split(inner);

    use crate::app::TxField;
    let focus = form.focus.unwrap_or(TxField::Amount);
    render_field(
        frame,
        rows[0],
        "Amount",
        &form.amount,
        false,
        focus == TxField::Amount,
        theme,
    );
    render_field(
        frame,
        rows[1],
        "Category",
        &form.category,
        false,
        focus == TxField::Category,
        theme,
    );
    render_field(
        frame,
        rows[2],
        "Currency",
        &form.currency,
        false,
        focus == TxField::Currency,
        theme,
    );

    let (label, catalogue): (&str, &[&str]) = match form.kind_hint() {
        TransactionKind::Income => ("income (+): ", &INCOME_CATEGORIES),
        _ => ("expense (-): ", &EXPENSE_CATEGORIES),
    };
    let suggestions = Line::from(vec![
        Span::styled(label, Style::default().fg(theme.text_muted)),
        Span::styled(catalogue.join(" "), Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(suggestions).wrap(ratatui::widgets::Wrap { trim: true }), rows[4]);

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[5],
        );
    }
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some((_, name)) = &state.dashboard.pending_delete else {
        return;
    };
    let card_area = centered_box(46, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" delete transaction ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete \"{name}\"? This cannot be undone."),
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
