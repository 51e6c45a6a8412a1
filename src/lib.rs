//! # ATM Terminal
//!
//! An interactive ATM terminal: PIN-gated access to a single in-memory
//! account supporting balance inquiry, withdrawal, deposit, PIN change, and
//! transaction history.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Balances use 2 decimal places via `rust_decimal`
//! - **Explicit results**: Account operations return typed errors, never tuples
//! - **Strict invariants**: `balance >= 0` always maintained; history is append-only
//! - **Testable I/O**: The session runs over any `BufRead`/`Write` pair
//!
//! ## Example
//!
//! ```no_run
//! use atm_terminal::{Account, Money, Pin, Session};
//! use std::io::Cursor;
//!
//! let pin = Pin::new("1234").unwrap();
//! let mut account = Account::new(pin, "1000.00".parse::<Money>().unwrap());
//!
//! let mut output = Vec::new();
//! let mut session = Session::new(Cursor::new("1234\n1\n6\n"), &mut output);
//! session.run(&mut account).unwrap();
//! ```

pub mod account;
pub mod error;
pub mod money;
pub mod session;
pub mod transaction;

pub use account::{Account, Pin};
pub use error::{AtmError, Result};
pub use money::Money;
pub use session::{Session, SessionOutcome, MAX_PIN_ATTEMPTS};
pub use transaction::TransactionRecord;
