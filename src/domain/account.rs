//! Account state and transaction history.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Profit,
    Withdrawal,
    Reinvestment,
}

impl TransactionKind {
    /// Sign applied to the amount when the transaction hits the balance.
    fn sign(self) -> f64 {
        match self {
            TransactionKind::Profit | TransactionKind::Reinvestment => 1.0,
            TransactionKind::Withdrawal => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub amount: f64,
    /// Account balance after this transaction.
    pub balance: f64,
    pub description: String,
}

/// A named balance with its transaction history.
///
/// The projection engine only sets the final balance; it never records
/// transactions, so accounts in a [`Plan`](super::plan::Plan) carry an empty
/// history. [`Account::apply`] is for callers that track real cash movements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub name: String,
    pub balance: f64,
    history: Vec<Transaction>,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Account {
            name: name.into(),
            balance,
            history: Vec::new(),
        }
    }

    pub fn trading(balance: f64) -> Self {
        Self::new("Trading", balance)
    }

    pub fn savings() -> Self {
        Self::new("Savings", 0.0)
    }

    /// Applies a transaction to the balance and appends it to the history.
    pub fn apply(
        &mut self,
        date: NaiveDate,
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
    ) -> &Transaction {
        self.balance += kind.sign() * amount;
        self.history.push(Transaction {
            date,
            kind,
            amount,
            balance: self.balance,
            description: description.into(),
        });
        &self.history[self.history.len() - 1]
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }
}
