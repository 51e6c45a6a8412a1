//! Account model and operations.
//!
//! Maintains the invariant: `balance >= 0` at all times.

use crate::error::{AtmError, Result};
use crate::money::Money;
use crate::transaction::TransactionRecord;

/// A 4-digit numeric credential.
///
/// Stored as text to preserve leading zeros. Constructed only through
/// [`Pin::new`], which rejects anything other than exactly 4 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Validates and creates a PIN from its digit string.
    ///
    /// Fails with [`AtmError::InvalidPinFormat`] unless `digits` is exactly
    /// 4 decimal digits.
    pub fn new(digits: &str) -> Result<Self> {
        if digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Pin(digits.to_owned()))
        } else {
            Err(AtmError::InvalidPinFormat)
        }
    }

    /// Compares this PIN against a candidate entry.
    fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

/// A bank account with PIN-gated ATM operations.
///
/// # Invariants
///
/// - `balance >= 0` after every operation; withdrawals that would overdraw
///   are rejected with [`AtmError::InsufficientFunds`]
/// - The PIN is always exactly 4 decimal digits
/// - Every successful withdraw/deposit/PIN-change appends exactly one
///   record to the history; failed operations append nothing
///
/// The account has no concept of login attempts. Session access control
/// (the 3-attempt PIN gate) belongs to the session controller, which calls
/// [`Account::verify_pin`] for each entry.
#[derive(Debug, Clone)]
pub struct Account {
    /// The current PIN. Mutable only via a successful `change_pin`.
    pin: Pin,

    /// Current balance. Never negative.
    balance: Money,

    /// Append-only ledger, in insertion order. Never reordered or truncated.
    history: Vec<TransactionRecord>,
}

impl Account {
    /// Creates an account with the given PIN and starting balance.
    ///
    /// The starting balance must be non-negative; callers validate input
    /// before construction.
    pub fn new(pin: Pin, initial_balance: Money) -> Self {
        debug_assert!(initial_balance >= Money::ZERO);
        Account {
            pin,
            balance: initial_balance,
            history: Vec::new(),
        }
    }

    /// Returns the current balance. No side effects, cannot fail.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Returns `true` if `candidate` matches the stored PIN.
    ///
    /// The account owns the comparison; callers never see the stored PIN.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    /// Withdraws funds from the account.
    ///
    /// Fails with [`AtmError::InvalidAmount`] when `amount <= 0`, and with
    /// [`AtmError::InsufficientFunds`] when `amount` exceeds the balance.
    /// On success the withdrawal is recorded and the new balance returned.
    pub fn withdraw(&mut self, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AtmError::InsufficientFunds);
        }

        // 0 < amount <= balance, so the subtraction stays in range
        self.balance -= amount;
        self.history.push(TransactionRecord::Withdrawal(amount));
        Ok(self.balance)
    }

    /// Deposits funds into the account.
    ///
    /// Fails with [`AtmError::InvalidAmount`] when `amount <= 0`, and with
    /// [`AtmError::BalanceOverflow`] when the sum would exceed the
    /// representable range. On success the deposit is recorded and the new
    /// balance returned.
    pub fn deposit(&mut self, amount: Money) -> Result<Money> {
        if !amount.is_positive() {
            return Err(AtmError::InvalidAmount);
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AtmError::BalanceOverflow)?;
        self.history.push(TransactionRecord::Deposit(amount));
        Ok(self.balance)
    }

    /// Changes the account PIN after verifying the current one.
    ///
    /// Fails with [`AtmError::AuthenticationFailed`] when `old_pin` does not
    /// match (checked first), and with [`AtmError::InvalidPinFormat`] when
    /// `new_pin` is not exactly 4 decimal digits. The history record never
    /// contains the PIN value.
    pub fn change_pin(&mut self, old_pin: &str, new_pin: &str) -> Result<()> {
        if !self.pin.matches(old_pin) {
            return Err(AtmError::AuthenticationFailed);
        }

        self.pin = Pin::new(new_pin)?;
        self.history.push(TransactionRecord::PinChange);
        Ok(())
    }

    /// Returns the transaction history in insertion order.
    ///
    /// The slice is an immutable view; the underlying ledger cannot be
    /// mutated through it.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Verifies the invariant: `balance >= 0`.
    #[cfg(debug_assertions)]
    pub fn check_invariant(&self) -> bool {
        self.balance >= Money::ZERO
    }
}
