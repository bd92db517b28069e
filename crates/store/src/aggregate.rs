use api_types::transaction::{Transaction, TransactionKind};

use crate::Amount;

/// Derived income/expense/balance figures for a transaction list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub total_balance: Amount,
}

/// Reduces a transaction list into its aggregate totals.
///
/// Income sums signed amounts, expenses sum absolute amounts, and the balance
/// is their difference. Transfers do not contribute. The sum is commutative,
/// so the result does not depend on list order.
#[must_use]
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut total_income = Amount::ZERO;
    let mut total_expenses = Amount::ZERO;

    for tx in transactions {
        let amount = Amount::from_wire(tx.amount);
        match tx.kind {
            TransactionKind::Income => total_income += amount,
            TransactionKind::Expense => total_expenses += amount.abs(),
            TransactionKind::Transfer => {}
        }
    }

    Totals {
        total_income,
        total_expenses,
        total_balance: total_income - total_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(id_: i64, kind: TransactionKind, amount: f64) -> Transaction {
        Transaction {
            id_,
            amount,
            kind,
            category_name: "food".to_string(),
            currency: None,
            date: Utc::now(),
            new_capital: None,
        }
    }

    #[test]
    fn income_minus_expenses_equals_balance() {
        let list = vec![
            tx(1, TransactionKind::Income, 100.0),
            tx(2, TransactionKind::Expense, -40.0),
        ];
        let totals = totals(&list);
        assert_eq!(totals.total_income, Amount::new(100_00));
        assert_eq!(totals.total_expenses, Amount::new(40_00));
        assert_eq!(totals.total_balance, Amount::new(60_00));
        assert_eq!(
            totals.total_income - totals.total_expenses,
            totals.total_balance
        );
    }

    #[test]
    fn totals_are_order_independent() {
        let mut list = vec![
            tx(1, TransactionKind::Income, 1200.50),
            tx(2, TransactionKind::Expense, 33.10),
            tx(3, TransactionKind::Expense, -7.40),
            tx(4, TransactionKind::Income, 0.99),
            tx(5, TransactionKind::Transfer, 500.0),
        ];
        let reference = totals(&list);

        list.rotate_left(2);
        assert_eq!(totals(&list), reference);

        list.reverse();
        assert_eq!(totals(&list), reference);
    }

    #[test]
    fn transfers_do_not_contribute() {
        let list = vec![tx(1, TransactionKind::Transfer, 999.0)];
        assert_eq!(totals(&list), Totals::default());
    }

    #[test]
    fn empty_list_yields_zero_totals() {
        assert_eq!(totals(&[]), Totals::default());
    }
}
