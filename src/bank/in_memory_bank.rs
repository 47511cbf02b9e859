use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{
    account::{Account, AccountSummary, InterestAccrual, Withdrawal},
    command::OpenAccountCommand,
    registry::AccountRegistry,
    transaction::Transaction,
};

use super::{AccountListing, Bank, BankError};

#[derive(Debug, Default)]
pub struct InMemoryBank {
    registry: AccountRegistry,
}

impl InMemoryBank {
    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }
}

impl Bank for InMemoryBank {
    fn create_account(
        &mut self,
        number: &str,
        holder: &str,
        initial_balance: Decimal,
        variant: &str,
        variant_param: Decimal,
    ) -> Result<&Account, BankError> {
        let cmd = OpenAccountCommand::parse(number, holder, initial_balance, variant, variant_param)?;
        let acc = self.registry.register(cmd.into_account())?;
        info!(
            account = acc.number(),
            kind = acc.kind().name(),
            balance = %acc.balance(),
            "account created"
        );
        Ok(acc)
    }

    fn deposit(&mut self, number: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let acc = self.registry.find_by_number_mut(number)?;
        Ok(acc.deposit(amount)?)
    }

    fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<Withdrawal, BankError> {
        let acc = self.registry.find_by_number_mut(number)?;
        Ok(acc.withdraw(amount)?)
    }

    fn add_interest(&mut self, number: &str) -> Result<InterestAccrual, BankError> {
        let mut savings = self
            .registry
            .find_by_number_mut(number)?
            .as_savings_mut()
            .ok_or_else(|| BankError::NotSavings(number.to_string()))?;
        Ok(savings.add_interest()?)
    }

    fn add_interest_to_savings(&mut self) -> Vec<(String, Result<InterestAccrual, BankError>)> {
        let accruals: Vec<_> = self
            .registry
            .savings_mut()
            .map(|mut savings| {
                let accrual = savings.add_interest().map_err(BankError::from);
                (savings.number().to_string(), accrual)
            })
            .collect();
        debug!(accounts = accruals.len(), "interest accrual finished");
        accruals
    }

    fn list_accounts(&self) -> Vec<AccountListing> {
        self.registry
            .accounts()
            .iter()
            .enumerate()
            .map(|(index, acc)| AccountListing {
                index,
                number: acc.number().to_string(),
                holder: acc.holder().to_string(),
            })
            .collect()
    }

    fn find_by_index(&self, index: usize) -> Result<&Account, BankError> {
        Ok(self.registry.find_by_index(index)?)
    }

    fn find_by_number(&self, number: &str) -> Result<&Account, BankError> {
        Ok(self.registry.find_by_number(number)?)
    }

    fn describe(&self, number: &str) -> Result<AccountSummary, BankError> {
        Ok(self.registry.find_by_number(number)?.describe())
    }

    fn history(&self, number: &str) -> Result<&[Transaction], BankError> {
        Ok(self.registry.find_by_number(number)?.history())
    }
}
