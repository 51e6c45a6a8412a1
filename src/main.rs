//! ATM Terminal CLI
//!
//! Runs an interactive ATM session over stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [initial-balance] [pin]
//! ```
//!
//! Defaults to a balance of 1000.00 and PIN 1234 when no arguments are given.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use atm_terminal::{Account, AtmError, Money, Pin, Result, Session};
use std::env;
use std::io;
use std::process;

const DEFAULT_BALANCE: &str = "1000.00";
const DEFAULT_PIN: &str = "1234";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let balance = match args.get(1) {
        Some(raw) => raw.parse::<Money>().map_err(|_| {
            AtmError::InvalidArgument(format!("{:?} is not a valid starting balance", raw))
        })?,
        None => DEFAULT_BALANCE.parse::<Money>()?,
    };
    if balance < Money::ZERO {
        return Err(AtmError::InvalidArgument(format!(
            "starting balance must not be negative, got {}",
            balance
        )));
    }

    let pin = match args.get(2) {
        Some(raw) => Pin::new(raw)?,
        None => Pin::new(DEFAULT_PIN)?,
    };

    let mut account = Account::new(pin, balance);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run(&mut account)?;

    Ok(())
}
