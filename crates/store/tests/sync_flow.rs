//! Replays the dashboard synchronization sequence against the reducers:
//! fetch, create, edit, delete, and a failure in between. Mirrors what the
//! async actions apply after each API round trip.

use api_types::transaction::{Transaction, TransactionDeleted, TransactionKind};
use chrono::Utc;
use store::{Amount, OpPhase, TransactionsSlice};

fn tx(id_: i64, kind: TransactionKind, amount: f64) -> Transaction {
    Transaction {
        id_,
        amount,
        kind,
        category_name: "food".to_string(),
        currency: Some("USD".to_string()),
        date: Utc::now(),
        new_capital: None,
    }
}

#[test]
fn dashboard_session_replay() {
    let mut slice = TransactionsSlice::default();

    // Login snapshot reported the authoritative capital.
    slice.set_capital(60.0);

    // Initial fetch.
    slice.pending();
    slice.fetch_fulfilled(vec![
        tx(1, TransactionKind::Income, 100.0),
        tx(2, TransactionKind::Expense, -40.0),
    ]);
    assert_eq!(slice.totals.total_income, Amount::new(100_00));
    assert_eq!(slice.totals.total_expenses, Amount::new(40_00));
    assert_eq!(slice.balance(), Amount::new(60_00));

    // Create: the server reports the new capital alongside the row.
    slice.pending();
    let mut created = tx(3, TransactionKind::Income, 15.0);
    created.new_capital = Some(75.0);
    slice.create_fulfilled(created);
    assert_eq!(slice.items.len(), 3);
    assert_eq!(slice.items[0].id_, 3);
    assert_eq!(slice.balance(), Amount::new(75_00));

    // A failed update surfaces the message and leaves the list alone.
    slice.pending();
    slice.rejected("Transaction not found".to_string());
    assert_eq!(slice.phase, OpPhase::Rejected);
    assert_eq!(slice.error.as_deref(), Some("Transaction not found"));
    assert_eq!(slice.items.len(), 3);

    // Edit: no capital comes back, aggregates recompute locally.
    slice.pending();
    slice.update_fulfilled(tx(2, TransactionKind::Expense, -25.0));
    assert!(slice.error.is_none());
    assert_eq!(slice.totals.total_expenses, Amount::new(25_00));
    // Capital last reported by the server still wins for display.
    assert_eq!(slice.balance(), Amount::new(75_00));

    // Delete: exactly one row goes away and the server balance is adopted.
    slice.pending();
    slice.delete_fulfilled(&TransactionDeleted {
        id_: 3,
        new_capital: 60.0,
    });
    assert_eq!(slice.items.len(), 2);
    assert!(slice.items.iter().all(|t| t.id_ != 3));
    assert_eq!(slice.capital(), Some(Amount::new(60_00)));
    assert_eq!(slice.balance(), Amount::new(60_00));
}
