use crate::clock::Clock;
use crate::error::Result;
use crate::ledger::DayLedger;
use crate::models::{DayRecord, PetRecord};
use crate::store::LedgerStore;
use crate::wallet::Wallet;
use chrono::NaiveDate;
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

/// The wallet and the day ledger, updated together when a session closes.
pub struct AccountBook {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    wallet: Wallet,
}

impl AccountBook {
    pub fn open(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>) -> Result<Self> {
        let wallet = Wallet::load(Arc::clone(&store))?;
        Ok(Self { store, clock, wallet })
    }

    pub fn balance(&self) -> u64 {
        self.wallet.balance()
    }

    pub fn pet(&self) -> &PetRecord {
        self.wallet.pet()
    }

    /// Credit a closed session: coins to the wallet, studied time and coins
    /// to today's record. Either both records change or neither does.
    pub fn settle(&mut self, time_studied: Duration, coins: u64) -> Result<()> {
        let mut today = DayLedger::today(Arc::clone(&self.store), self.clock.as_ref())?;
        let previous = self.wallet.pet().clone();
        self.wallet.deposit(coins)?;

        let delta = i64::try_from(coins).unwrap_or(i64::MAX);
        if let Err(e) = today.add_session(time_studied, delta) {
            self.roll_back(previous);
            return Err(e);
        }

        info!(
            "Settled session: {coins} coins, balance now {}",
            self.wallet.balance()
        );
        Ok(())
    }

    /// Spend coins. On success the spend is also recorded against today.
    pub fn spend(&mut self, amount: u64) -> Result<bool> {
        let mut today = DayLedger::today(Arc::clone(&self.store), self.clock.as_ref())?;
        let previous = self.wallet.pet().clone();
        if !self.wallet.withdraw(amount)? {
            return Ok(false);
        }

        if let Err(e) = today.add_funds(i64::try_from(amount).map_or(i64::MIN, |v| -v)) {
            self.roll_back(previous);
            return Err(e);
        }
        Ok(true)
    }

    fn roll_back(&mut self, previous: PetRecord) {
        if let Err(e) = self.wallet.restore(previous) {
            error!("Could not roll back wallet after a failed ledger write: {e}");
        }
    }

    /// Today's record, created if it does not exist yet.
    pub fn today(&self) -> Result<DayRecord> {
        DayLedger::today(Arc::clone(&self.store), self.clock.as_ref()).map(|l| l.record().clone())
    }

    pub fn review(&self, date: NaiveDate) -> Result<Option<DayRecord>> {
        DayLedger::lookup(self.store.as_ref(), date)
    }
}
