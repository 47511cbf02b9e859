//! This module could be a separate crate on its own, it bootstraps [`crate::bank`]
//! behind a menu driven console. Kept in the library so integration tests can
//! drive it with scripted input.

use std::io::{BufRead, Write};

use anyhow::Result;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::{AccountKind, AccountSummary},
    bank::{Bank, BankError, in_memory_bank::InMemoryBank},
    command::{AccountVariant, CommandError},
    transaction::round_cents,
};
use csv_printer::{StatementLine, print_statement};
use input::{InputError, LineReader};

pub mod csv_printer;
pub mod input;

const MENU: &str = "
=== Bank Account Simulation ===
1. Create Account
2. Perform Transaction
3. View Account Information
4. View Transaction History
5. Add Interest to Savings Accounts
6. Export Transaction History (CSV)
7. Exit
Enter your choice: ";

pub struct Shell<'w, R, W: 'w> {
    input: LineReader<R>,
    output: &'w mut W,
    bank: InMemoryBank,
}

impl<'w, R, W> Shell<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    pub fn new(input: R, output: &'w mut W) -> Self {
        Self {
            input: LineReader::new(input),
            output,
            bank: InMemoryBank::default(),
        }
    }

    pub fn bank(&self) -> &InMemoryBank {
        &self.bank
    }

    /// Runs the menu loop until the user exits or the input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Bank Account Simulation!")?;
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;
            let step = self.read_choice().and_then(|choice| {
                debug!(choice, "menu choice");
                self.handle_choice(choice)
            });
            match step {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => match err.downcast_ref::<InputError>().cloned() {
                    Some(InputError::EndOfInput) => break,
                    Some(interrupt @ InputError::InvalidNumber(_)) => {
                        writeln!(self.output, "{interrupt}")?
                    }
                    None => return Err(err),
                },
            }
        }
        writeln!(self.output, "Thank you for using Bank Account Simulation!")?;
        Ok(())
    }

    /// An unparseable choice maps to 0, which no menu entry uses.
    fn read_choice(&mut self) -> Result<u32> {
        match self.input.next_number::<u32>() {
            Err(err)
                if matches!(
                    err.downcast_ref::<InputError>(),
                    Some(InputError::InvalidNumber(_))
                ) =>
            {
                Ok(0)
            }
            choice => choice,
        }
    }

    /// Returns `false` once the user asked to leave.
    fn handle_choice(&mut self, choice: u32) -> Result<bool> {
        match choice {
            1 => self.create_account()?,
            2 => self.perform_transaction()?,
            3 => self.view_account_info()?,
            4 => self.view_transaction_history()?,
            5 => self.add_interest_to_savings()?,
            6 => self.export_transaction_history()?,
            7 => return Ok(false),
            _ => writeln!(self.output, "Invalid choice! Please try again.")?,
        }
        Ok(true)
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn report(&mut self, err: BankError) -> Result<()> {
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    fn create_account(&mut self) -> Result<()> {
        self.prompt("Enter account holder name: ")?;
        let holder = self.input.next_line()?;
        self.prompt("Enter account number: ")?;
        let number = self.input.next_line()?;
        if self.bank.find_by_number(&number).is_ok() {
            writeln!(self.output, "Account number already exists!")?;
            return Ok(());
        }

        self.prompt("Enter initial balance: $")?;
        let initial_balance: Decimal = self.input.next_number()?;
        if initial_balance < Decimal::ZERO {
            writeln!(self.output, "{}", CommandError::NegativeInitialBalance)?;
            return Ok(());
        }

        self.prompt("Select account type:\n1. Savings Account\n2. Checking Account\nEnter choice: ")?;
        let selector = self.input.next_line()?;
        let variant_param: Decimal = match selector.parse::<AccountVariant>() {
            Ok(AccountVariant::Savings) => {
                self.prompt("Enter interest rate (%): ")?;
                self.input.next_number()?
            }
            Ok(AccountVariant::Checking) => {
                self.prompt("Enter overdraft limit: $")?;
                self.input.next_number()?
            }
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        match self.bank.create_account(
            &number,
            &holder,
            initial_balance,
            &selector,
            variant_param,
        ) {
            Ok(_) => writeln!(self.output, "Account created successfully!")?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    /// Lists the accounts and returns the number of the chosen one.
    fn select_account(&mut self) -> Result<Option<String>> {
        let listing = self.bank.list_accounts();
        if listing.is_empty() {
            writeln!(
                self.output,
                "No accounts available! Please create an account first."
            )?;
            return Ok(None);
        }

        writeln!(self.output, "\nAvailable accounts:")?;
        for acc in &listing {
            writeln!(self.output, "{}. {} ({})", acc.index + 1, acc.number, acc.holder)?;
        }
        self.prompt("Select account number: ")?;
        let choice = match self.input.next_number::<usize>() {
            Ok(choice) => choice,
            Err(err)
                if matches!(
                    err.downcast_ref::<InputError>(),
                    Some(InputError::InvalidNumber(_))
                ) =>
            {
                0
            }
            Err(err) => return Err(err),
        };
        let selected = choice
            .checked_sub(1)
            .and_then(|index| self.bank.find_by_index(index).ok());
        match selected {
            Some(acc) => Ok(Some(acc.number().to_string())),
            None => {
                writeln!(self.output, "Invalid account selection!")?;
                Ok(None)
            }
        }
    }

    fn perform_transaction(&mut self) -> Result<()> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };

        self.prompt("\nSelect transaction type:\n1. Deposit\n2. Withdraw\nEnter choice: ")?;
        let choice = self.input.next_number::<u32>()?;
        self.prompt("Enter amount: $")?;
        let amount: Decimal = self.input.next_number()?;

        match choice {
            1 => match self.bank.deposit(&number, amount) {
                Ok(balance) => writeln!(
                    self.output,
                    "Deposited ${}. New balance: ${}",
                    round_cents(amount),
                    round_cents(balance)
                )?,
                Err(err) => self.report(err)?,
            },
            2 => match self.bank.withdraw(&number, amount) {
                Ok(withdrawal) => {
                    writeln!(
                        self.output,
                        "Withdrawn ${}. New balance: ${}",
                        round_cents(withdrawal.amount),
                        round_cents(withdrawal.new_balance)
                    )?;
                    if withdrawal.overdrawn {
                        writeln!(
                            self.output,
                            "Warning: Account overdrawn by ${}",
                            round_cents(withdrawal.new_balance.abs())
                        )?;
                    }
                }
                Err(err) => self.report(err)?,
            },
            _ => writeln!(self.output, "Invalid transaction type!")?,
        }
        Ok(())
    }

    fn view_account_info(&mut self) -> Result<()> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        match self.bank.describe(&number) {
            Ok(summary) => write_summary(&mut *self.output, &summary)?,
            Err(err) => self.report(err)?,
        }
        Ok(())
    }

    fn view_transaction_history(&mut self) -> Result<()> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        let history = match self.bank.history(&number) {
            Ok(history) => history,
            Err(err) => return self.report(err),
        };
        writeln!(self.output, "\n=== Transaction History ===")?;
        if history.is_empty() {
            writeln!(self.output, "No transactions found.")?;
        }
        for tx in history {
            writeln!(self.output, "{tx}")?;
        }
        Ok(())
    }

    fn add_interest_to_savings(&mut self) -> Result<()> {
        let accruals = self.bank.add_interest_to_savings();
        if accruals.is_empty() {
            writeln!(self.output, "No savings accounts found!")?;
        }
        for (number, accrual) in accruals {
            writeln!(self.output, "\nAdding interest to account: {number}")?;
            match accrual {
                Ok(accrual) => writeln!(
                    self.output,
                    "Interest added: ${}. New balance: ${}",
                    round_cents(accrual.interest),
                    round_cents(accrual.new_balance)
                )?,
                Err(err) => self.report(err)?,
            }
        }
        Ok(())
    }

    fn export_transaction_history(&mut self) -> Result<()> {
        let Some(number) = self.select_account()? else {
            return Ok(());
        };
        let history = match self.bank.history(&number) {
            Ok(history) => history,
            Err(err) => return self.report(err),
        };
        writeln!(self.output)?;
        print_statement(&mut *self.output, history.iter().map(StatementLine::from))
    }
}

fn write_summary<W>(output: &mut W, summary: &AccountSummary) -> Result<()>
where
    W: Write,
{
    writeln!(output, "\n=== Account Information ===")?;
    writeln!(output, "Account Type: {}", summary.kind.name())?;
    writeln!(output, "Account Number: {}", summary.number)?;
    writeln!(output, "Account Holder: {}", summary.holder)?;
    writeln!(output, "Current Balance: ${}", round_cents(summary.balance))?;
    match &summary.kind {
        AccountKind::Savings(terms) => {
            writeln!(output, "Interest Rate: {}%", round_cents(terms.interest_rate()))?;
            writeln!(
                output,
                "Minimum Balance: ${}",
                round_cents(terms.minimum_balance())
            )?;
        }
        AccountKind::Checking(terms) => {
            writeln!(output, "Overdraft Limit: ${}", round_cents(terms.overdraft_limit))?;
        }
    }
    Ok(())
}
