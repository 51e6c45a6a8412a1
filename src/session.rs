//! Console session controller.
//!
//! Owns the PIN gate and the menu loop around an [`Account`]. The account
//! performs the operations; the session parses input, renders results, and
//! keeps looping on recoverable failures.

use crate::account::Account;
use crate::error::Result;
use crate::money::Money;
use log::{debug, warn};
use std::io::{BufRead, Write};

/// Maximum PIN entries before the session is locked out.
pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// How a session ended.
///
/// Lockout is a deliberate, designed termination, not an error: both
/// outcomes are clean exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user reached the menu and exited (or input ended).
    Completed,

    /// All PIN attempts were exhausted; the menu was never shown.
    LockedOut,
}

/// Result of the PIN gate.
enum PinGate {
    /// A PIN was accepted.
    Granted,

    /// Every attempt was used on a wrong PIN.
    Exhausted,

    /// Input ended before a PIN was accepted or attempts ran out.
    InputEnded,
}

/// An interactive ATM session over arbitrary I/O streams.
///
/// Generic over `BufRead`/`Write` so sessions can be driven from in-memory
/// buffers in tests and from locked stdin/stdout in the binary.
///
/// # Input Handling
///
/// Every prompt re-reads a full line; EOF on the input stream ends the
/// session cleanly, so piped input never hangs or aborts. Unparseable
/// amounts and invalid menu selections are reported and re-prompted,
/// never fatal.
pub struct Session<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over the given input and output streams.
    pub fn new(reader: R, writer: W) -> Self {
        Session { reader, writer }
    }

    /// Runs the full session: PIN gate, then the menu loop until exit.
    pub fn run(&mut self, account: &mut Account) -> Result<SessionOutcome> {
        writeln!(self.writer, "Welcome to the ATM.")?;

        match self.authenticate(account)? {
            PinGate::Granted => {}
            PinGate::Exhausted => {
                writeln!(self.writer, "Too many incorrect PIN attempts. Exiting.")?;
                return Ok(SessionOutcome::LockedOut);
            }
            PinGate::InputEnded => return Ok(SessionOutcome::Completed),
        }

        loop {
            self.print_menu()?;
            let choice = match self.read_line()? {
                Some(line) => line,
                None => break,
            };
            writeln!(self.writer)?;

            match choice.trim() {
                "1" => self.show_balance(account)?,
                "2" => self.handle_withdrawal(account)?,
                "3" => self.handle_deposit(account)?,
                "4" => self.handle_pin_change(account)?,
                "5" => self.show_history(account)?,
                "6" => {
                    writeln!(self.writer, "Thank you for using the ATM. Goodbye!")?;
                    break;
                }
                other => {
                    debug!("Invalid menu selection {:?}", other);
                    writeln!(self.writer, "Invalid selection. Please choose a valid option.")?;
                    writeln!(self.writer)?;
                }
            }
        }

        Ok(SessionOutcome::Completed)
    }

    /// Runs the PIN gate, counting wrong entries against `MAX_PIN_ATTEMPTS`.
    fn authenticate(&mut self, account: &Account) -> Result<PinGate> {
        for attempt in 1..=MAX_PIN_ATTEMPTS {
            write!(self.writer, "Please enter your 4-digit PIN: ")?;
            self.writer.flush()?;

            let entered = match self.read_line()? {
                Some(line) => line,
                None => return Ok(PinGate::InputEnded),
            };

            if account.verify_pin(entered.trim()) {
                debug!("PIN accepted on attempt {}", attempt);
                writeln!(self.writer, "PIN accepted. Access granted.")?;
                writeln!(self.writer)?;
                return Ok(PinGate::Granted);
            }

            warn!("Incorrect PIN attempt {} of {}", attempt, MAX_PIN_ATTEMPTS);
            writeln!(self.writer, "Incorrect PIN. Please try again.")?;
            writeln!(self.writer)?;
        }

        Ok(PinGate::Exhausted)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.writer, "Please choose from the following options:")?;
        writeln!(self.writer, "1. Account Balance Inquiry")?;
        writeln!(self.writer, "2. Cash Withdrawal")?;
        writeln!(self.writer, "3. Cash Deposit")?;
        writeln!(self.writer, "4. PIN Change")?;
        writeln!(self.writer, "5. Transaction History")?;
        writeln!(self.writer, "6. Exit")?;
        write!(self.writer, "Enter the number corresponding to your choice: ")?;
        self.writer.flush()?;
        Ok(())
    }

    fn show_balance(&mut self, account: &Account) -> Result<()> {
        writeln!(self.writer, "Your current balance is: ${}", account.balance())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn handle_withdrawal(&mut self, account: &mut Account) -> Result<()> {
        let amount = match self.read_amount("Enter the amount to withdraw: $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match account.withdraw(amount) {
            Ok(balance) => {
                debug!("Withdrew {}", amount);
                writeln!(
                    self.writer,
                    "Successfully withdrew ${}. New balance: ${}",
                    amount, balance
                )?;
            }
            Err(e) => {
                warn!("Withdrawal of {} rejected: {}", amount, e);
                writeln!(self.writer, "{}", e)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn handle_deposit(&mut self, account: &mut Account) -> Result<()> {
        let amount = match self.read_amount("Enter the amount to deposit: $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };

        match account.deposit(amount) {
            Ok(balance) => {
                debug!("Deposited {}", amount);
                writeln!(
                    self.writer,
                    "Successfully deposited ${}. New balance: ${}",
                    amount, balance
                )?;
            }
            Err(e) => {
                warn!("Deposit of {} rejected: {}", amount, e);
                writeln!(self.writer, "{}", e)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn handle_pin_change(&mut self, account: &mut Account) -> Result<()> {
        write!(self.writer, "Enter your current PIN: ")?;
        self.writer.flush()?;
        let old_pin = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        write!(self.writer, "Enter your new 4-digit PIN: ")?;
        self.writer.flush()?;
        let new_pin = match self.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        match account.change_pin(old_pin.trim(), new_pin.trim()) {
            Ok(()) => {
                debug!("PIN changed");
                writeln!(self.writer, "PIN successfully changed.")?;
            }
            Err(e) => {
                warn!("PIN change rejected: {}", e);
                writeln!(self.writer, "{}", e)?;
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn show_history(&mut self, account: &Account) -> Result<()> {
        let history = account.history();
        if history.is_empty() {
            writeln!(self.writer, "No transactions have been made yet.")?;
        } else {
            writeln!(self.writer, "Transaction History:")?;
            for (idx, record) in history.iter().enumerate() {
                writeln!(self.writer, "{}. {}", idx + 1, record)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    /// Prompts for and parses a monetary amount.
    ///
    /// Returns `Ok(None)` on EOF or unparseable input; the parse failure is
    /// reported to the user before returning.
    fn read_amount(&mut self, prompt: &str) -> Result<Option<Money>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        match line.trim().parse::<Money>() {
            Ok(amount) => Ok(Some(amount)),
            Err(e) => {
                warn!("Unparseable amount {:?}", line.trim());
                writeln!(self.writer, "{}", e)?;
                writeln!(self.writer)?;
                Ok(None)
            }
        }
    }

    /// Reads one input line. Returns `None` on EOF.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Pin;
    use std::io::Cursor;
    use std::str::FromStr;

    fn account() -> Account {
        Account::new(Pin::new("1234").unwrap(), Money::from_str("1000.00").unwrap())
    }

    fn run_session(input: &str, account: &mut Account) -> (SessionOutcome, String) {
        let mut output = Vec::new();
        let outcome = Session::new(Cursor::new(input), &mut output)
            .run(account)
            .unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_correct_pin_then_exit() {
        let mut account = account();
        let (outcome, output) = run_session("1234\n6\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(output.contains("PIN accepted. Access granted."));
        assert!(output.contains("Thank you for using the ATM. Goodbye!"));
    }

    #[test]
    fn test_lockout_after_three_wrong_pins() {
        let mut account = account();
        let (outcome, output) = run_session("0000\n1111\n2222\n", &mut account);

        assert_eq!(outcome, SessionOutcome::LockedOut);
        assert_eq!(output.matches("Incorrect PIN. Please try again.").count(), 3);
        assert!(output.contains("Too many incorrect PIN attempts. Exiting."));
        assert!(!output.contains("Account Balance Inquiry"));
    }

    #[test]
    fn test_wrong_then_correct_pin_grants_access() {
        let mut account = account();
        let (outcome, output) = run_session("9999\n1234\n6\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(output.contains("Incorrect PIN. Please try again."));
        assert!(output.contains("PIN accepted. Access granted."));
    }

    #[test]
    fn test_balance_inquiry_shows_two_decimal_places() {
        let mut account = account();
        let (_, output) = run_session("1234\n1\n6\n", &mut account);

        assert!(output.contains("Your current balance is: $1000.00"));
    }

    #[test]
    fn test_withdrawal_updates_balance() {
        let mut account = account();
        let (_, output) = run_session("1234\n2\n200\n1\n6\n", &mut account);

        assert!(output.contains("Successfully withdrew $200.00. New balance: $800.00"));
        assert!(output.contains("Your current balance is: $800.00"));
        assert_eq!(account.balance().to_string(), "800.00");
    }

    #[test]
    fn test_deposit_updates_balance() {
        let mut account = account();
        let (_, output) = run_session("1234\n3\n50.50\n6\n", &mut account);

        assert!(output.contains("Successfully deposited $50.50. New balance: $1050.50"));
    }

    #[test]
    fn test_overdraw_reports_insufficient_funds() {
        let mut account = account();
        let (_, output) = run_session("1234\n2\n10000\n1\n6\n", &mut account);

        assert!(output.contains("Insufficient funds."));
        assert!(output.contains("Your current balance is: $1000.00"));
    }

    #[test]
    fn test_non_numeric_amount_keeps_session_alive() {
        let mut account = account();
        let (outcome, output) = run_session("1234\n2\nabc\n1\n6\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(output.contains("Invalid input. Please enter a numeric value."));
        assert!(output.contains("Your current balance is: $1000.00"));
        assert!(account.history().is_empty());
    }

    #[test]
    fn test_invalid_menu_selection_reprompts() {
        let mut account = account();
        let (outcome, output) = run_session("1234\n9\nhello\n6\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(
            output.matches("Invalid selection. Please choose a valid option.").count(),
            2
        );
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_pin_change_through_menu() {
        let mut account = account();
        let (_, output) = run_session("1234\n4\n1234\n5678\n6\n", &mut account);

        assert!(output.contains("PIN successfully changed."));
        assert!(account.verify_pin("5678"));
    }

    #[test]
    fn test_rejected_pin_change_reports_reason() {
        let mut account = account();
        let (_, output) = run_session("1234\n4\n1234\n56\n6\n", &mut account);

        assert!(output.contains("New PIN must be a 4-digit number."));
        assert!(account.verify_pin("1234"));
    }

    #[test]
    fn test_empty_history_notice() {
        let mut account = account();
        let (_, output) = run_session("1234\n5\n6\n", &mut account);

        assert!(output.contains("No transactions have been made yet."));
    }

    #[test]
    fn test_history_lists_numbered_records() {
        let mut account = account();
        let (_, output) = run_session("1234\n2\n200\n3\n50\n5\n6\n", &mut account);

        assert!(output.contains("Transaction History:"));
        assert!(output.contains("1. Withdrew $200.00"));
        assert!(output.contains("2. Deposited $50.00"));
    }

    #[test]
    fn test_eof_at_menu_ends_session_cleanly() {
        let mut account = account();
        let (outcome, _) = run_session("1234\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
    }

    #[test]
    fn test_eof_during_pin_entry_ends_quietly() {
        let mut account = account();
        let (outcome, output) = run_session("", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert!(!output.contains("Too many incorrect PIN attempts. Exiting."));
    }

    #[test]
    fn test_eof_after_some_wrong_pins_is_not_a_lockout() {
        let mut account = account();
        let (outcome, output) = run_session("0000\n", &mut account);

        assert_eq!(outcome, SessionOutcome::Completed);
        assert_eq!(output.matches("Incorrect PIN. Please try again.").count(), 1);
        assert!(!output.contains("Too many incorrect PIN attempts. Exiting."));
    }
}
