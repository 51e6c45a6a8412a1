//! Transaction records for the account's ledger.

use crate::money::Money;
use std::fmt;

/// A single entry in the account's transaction history.
///
/// Records are display lines, not replayable events: each successful
/// account operation appends exactly one. `PinChange` deliberately carries
/// no PIN value so credentials never reach the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionRecord {
    /// Funds withdrawn from the account.
    Withdrawal(Money),

    /// Funds deposited into the account.
    Deposit(Money),

    /// The account PIN was changed.
    PinChange,
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionRecord::Withdrawal(amount) => write!(f, "Withdrew ${}", amount),
            TransactionRecord::Deposit(amount) => write!(f, "Deposited ${}", amount),
            TransactionRecord::PinChange => write!(f, "PIN changed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_withdrawal_display() {
        let record = TransactionRecord::Withdrawal(money("200"));
        assert_eq!(record.to_string(), "Withdrew $200.00");
    }

    #[test]
    fn test_deposit_display() {
        let record = TransactionRecord::Deposit(money("50.5"));
        assert_eq!(record.to_string(), "Deposited $50.50");
    }

    #[test]
    fn test_pin_change_display_carries_no_digits() {
        let record = TransactionRecord::PinChange;
        assert_eq!(record.to_string(), "PIN changed");
    }
}
