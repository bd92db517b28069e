use api_types::transaction::{Transaction, TransactionDeleted};

use crate::{
    Amount,
    aggregate::{self, Totals},
};

use super::OpPhase;

/// Transaction list plus its derived aggregates.
///
/// The backend's `capital` is the authoritative balance; it is adopted
/// whenever a response carries one (fetch-time snapshot, create, delete) and
/// only the income/expense breakdown is recomputed locally. When no server
/// capital has been seen yet the locally computed balance stands in.
#[derive(Debug, Default)]
pub struct TransactionsSlice {
    pub items: Vec<Transaction>,
    pub phase: OpPhase,
    pub error: Option<String>,
    pub totals: Totals,
    capital: Option<Amount>,
}

impl TransactionsSlice {
    /// The balance to display: server capital when known, local sum otherwise.
    #[must_use]
    pub fn balance(&self) -> Amount {
        self.capital.unwrap_or(self.totals.total_balance)
    }

    #[must_use]
    pub fn capital(&self) -> Option<Amount> {
        self.capital
    }

    /// Adopts the capital reported by the `/users/me` snapshot.
    pub fn set_capital(&mut self, capital: f64) {
        self.capital = Some(Amount::from_wire(capital));
    }

    pub fn pending(&mut self) {
        self.phase = OpPhase::Pending;
        self.error = None;
    }

    pub fn fetch_fulfilled(&mut self, items: Vec<Transaction>) {
        self.items = items;
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    /// Prepends the created transaction; the server's `new_capital` wins over
    /// the local recomputation when present.
    pub fn create_fulfilled(&mut self, tx: Transaction) {
        if let Some(new_capital) = tx.new_capital {
            self.capital = Some(Amount::from_wire(new_capital));
        }
        self.items.insert(0, tx);
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    /// Replaces the matching entry; no server capital comes back on update,
    /// so all aggregates are recomputed locally.
    pub fn update_fulfilled(&mut self, tx: Transaction) {
        if let Some(slot) = self.items.iter_mut().find(|t| t.id_ == tx.id_) {
            *slot = tx;
        }
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    /// Removes exactly one entry with the deleted id and adopts the
    /// server-reported balance.
    pub fn delete_fulfilled(&mut self, deleted: &TransactionDeleted) {
        if let Some(pos) = self.items.iter().position(|t| t.id_ == deleted.id_) {
            self.items.remove(pos);
        }
        self.capital = Some(Amount::from_wire(deleted.new_capital));
        self.phase = OpPhase::Fulfilled;
        self.error = None;
        self.recompute();
    }

    pub fn rejected(&mut self, message: String) {
        self.phase = OpPhase::Rejected;
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        self.totals = aggregate::totals(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::transaction::TransactionKind;
    use chrono::Utc;

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
    fn fetch_replaces_list_and_recomputes() {
        let mut slice = TransactionsSlice::default();
        slice.pending();
        assert!(slice.phase.is_pending());

        slice.fetch_fulfilled(vec![
            tx(1, TransactionKind::Income, 100.0),
            tx(2, TransactionKind::Expense, -40.0),
        ]);
        assert_eq!(slice.phase, OpPhase::Fulfilled);
        assert_eq!(slice.totals.total_income, Amount::new(100_00));
        assert_eq!(slice.totals.total_expenses, Amount::new(40_00));
        assert_eq!(slice.balance(), Amount::new(60_00));
    }

    #[test]
    fn snapshot_capital_takes_precedence_over_local_sum() {
        let mut slice = TransactionsSlice::default();
        slice.fetch_fulfilled(vec![tx(1, TransactionKind::Income, 100.0)]);
        assert_eq!(slice.balance(), Amount::new(100_00));

        // Server capital differs (e.g. currency conversion happened there).
        slice.set_capital(92.5);
        assert_eq!(slice.balance(), Amount::new(92_50));
        assert_eq!(slice.totals.total_income, Amount::new(100_00));
    }

    #[test]
    fn create_prefers_server_new_capital() {
        let mut slice = TransactionsSlice::default();
        slice.set_capital(60.0);

        let mut created = tx(3, TransactionKind::Income, 10.0);
        created.new_capital = Some(70.0);
        slice.create_fulfilled(created);

        assert_eq!(slice.items.len(), 1);
        assert_eq!(slice.items[0].id_, 3);
        assert_eq!(slice.balance(), Amount::new(70_00));
    }

    #[test]
    fn create_without_capital_falls_back_to_recomputation() {
        let mut slice = TransactionsSlice::default();
        slice.create_fulfilled(tx(1, TransactionKind::Income, 25.0));
        assert_eq!(slice.balance(), Amount::new(25_00));
    }

    #[test]
    fn create_prepends_to_the_list() {
        let mut slice = TransactionsSlice::default();
        slice.fetch_fulfilled(vec![tx(1, TransactionKind::Income, 1.0)]);
        slice.create_fulfilled(tx(2, TransactionKind::Expense, 2.0));
        assert_eq!(slice.items[0].id_, 2);
        assert_eq!(slice.items[1].id_, 1);
    }

    #[test]
    fn update_replaces_matching_entry_and_recomputes() {
        let mut slice = TransactionsSlice::default();
        slice.fetch_fulfilled(vec![
            tx(1, TransactionKind::Income, 100.0),
            tx(2, TransactionKind::Expense, 40.0),
        ]);

        slice.update_fulfilled(tx(2, TransactionKind::Expense, 15.0));
        assert_eq!(slice.items.len(), 2);
        assert_eq!(slice.totals.total_expenses, Amount::new(15_00));
        assert_eq!(slice.totals.total_balance, Amount::new(85_00));
    }

    #[test]
    fn delete_removes_exactly_one_match_and_adopts_capital() {
        let mut slice = TransactionsSlice::default();
        // Duplicate ids never happen server-side, but the reducer still must
        // remove a single entry.
        slice.fetch_fulfilled(vec![
            tx(7, TransactionKind::Expense, 5.0),
            tx(7, TransactionKind::Expense, 5.0),
            tx(8, TransactionKind::Income, 50.0),
        ]);

        slice.delete_fulfilled(&TransactionDeleted {
            id_: 7,
            new_capital: 45.0,
        });
        assert_eq!(slice.items.len(), 2);
        assert_eq!(slice.balance(), Amount::new(45_00));
    }

    #[test]
    fn rejected_surfaces_the_message_and_keeps_items() {
        let mut slice = TransactionsSlice::default();
        slice.fetch_fulfilled(vec![tx(1, TransactionKind::Income, 10.0)]);

        slice.pending();
        slice.rejected("Transaction not found".to_string());
        assert_eq!(slice.phase, OpPhase::Rejected);
        assert_eq!(slice.error.as_deref(), Some("Transaction not found"));
        assert_eq!(slice.items.len(), 1);
    }
}
