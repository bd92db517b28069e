use api_types::transaction::TransactionKind;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};
use store::Amount;

use crate::ui::theme::Theme;

/// Display symbol for a currency code; unknown codes render as themselves.
#[must_use]
pub fn currency_symbol(code: &str) -> &str {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "JPY" => "¥",
        "GBP" => "£",
        "AUD" => "A$",
        "CHF" => "CHF",
        "SEK" | "NOK" => "kr",
        "PLN" => "zł",
        "UAH" => "₴",
        _ => code,
    }
}

/// Symbol placement: PLN/SEK/NOK go after the amount, the rest before.
#[must_use]
pub fn format_amount(amount: Amount, currency: Option<&str>) -> String {
    let code = currency.unwrap_or("USD");
    let symbol = currency_symbol(code);
    if matches!(code.to_ascii_uppercase().as_str(), "PLN" | "SEK" | "NOK") {
        format!("{amount} {symbol}")
    } else if amount.is_negative() {
        format!("-{symbol}{}", amount.abs())
    } else {
        format!("{symbol}{amount}")
    }
}

/// Transaction row amount: `+`/`-` prefix by kind, colored accordingly.
#[must_use]
pub fn styled_kind_amount(
    kind: TransactionKind,
    amount: Amount,
    currency: Option<&str>,
    theme: &Theme,
) -> Span<'static> {
    let (prefix, color) = match kind {
        TransactionKind::Income => ("+", theme.positive),
        TransactionKind::Expense => ("-", theme.negative),
        TransactionKind::Transfer => ("", theme.dim),
    };
    Span::styled(
        format!("{prefix}{}", format_amount(amount.abs(), currency)),
        Style::default().fg(color),
    )
}

/// Bold total for the balance card, colored by sign.
#[must_use]
pub fn styled_balance(amount: Amount, currency: Option<&str>, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(
        format_amount(amount, currency),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Text progress bar like `████████░░ 80%`; full-width rule when `target` is
/// not positive.
#[must_use]
pub fn inline_progress_bar(current: Amount, target: Amount, width: usize) -> String {
    if !target.is_positive() {
        return "━".repeat(width);
    }
    let ratio = (current.cents() as f64 / target.cents() as f64).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64) as usize).min(width);
    let empty = width.saturating_sub(filled);
    let percentage = (ratio * 100.0) as u16;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(empty), percentage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_goes_after_for_nordic_and_polish_codes() {
        assert_eq!(format_amount(Amount::new(12_34), Some("PLN")), "12.34 zł");
        assert_eq!(format_amount(Amount::new(12_34), Some("SEK")), "12.34 kr");
        assert_eq!(format_amount(Amount::new(12_34), Some("USD")), "$12.34");
        assert_eq!(format_amount(Amount::new(12_34), None), "$12.34");
        assert_eq!(format_amount(Amount::new(-5_00), Some("EUR")), "-€5.00");
    }

    #[test]
    fn unknown_code_renders_as_itself() {
        assert_eq!(format_amount(Amount::new(1_00), Some("XXX")), "XXX1.00");
    }

    #[test]
    fn progress_bar_caps_at_full() {
        assert_eq!(
            inline_progress_bar(Amount::new(500), Amount::new(1000), 10),
            "█████░░░░░ 50%"
        );
        assert_eq!(
            inline_progress_bar(Amount::new(2000), Amount::new(1000), 4),
            "████ 100%"
        );
        assert_eq!(inline_progress_bar(Amount::ZERO, Amount::ZERO, 4), "━━━━");
    }
}
