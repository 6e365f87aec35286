use crate::clock::Clock;
use crate::error::Result;
use crate::models::DayRecord;
use crate::store::{load_record, save_record, LedgerStore, RecordKey};
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Write-through view of one day's record. Every write goes to the key
/// the ledger was opened with.
pub struct DayLedger {
    store: Arc<dyn LedgerStore>,
    key: RecordKey,
    record: DayRecord,
}

impl DayLedger {
    /// Load or lazily create the record for the clock's current date.
    pub fn today(store: Arc<dyn LedgerStore>, clock: &dyn Clock) -> Result<Self> {
        Self::open(store, clock.today())
    }

    /// Load or lazily create the record for `date`. A malformed record, or
    /// one filed under another date, is replaced by a fresh one.
    pub fn open(store: Arc<dyn LedgerStore>, date: NaiveDate) -> Result<Self> {
        let key = RecordKey::Day(date);
        let loaded = load_record::<DayRecord>(store.as_ref(), &key)?.filter(|record| {
            let matches = record.date == date;
            if !matches {
                warn!("Day record {key} holds {}, reinitializing", record.date);
            }
            matches
        });

        let record = match loaded {
            Some(record) => record,
            None => {
                info!("Creating day record {key}");
                let record = DayRecord::new(date);
                save_record(store.as_ref(), &key, &record)?;
                record
            }
        };

        Ok(Self { store, key, record })
    }

    /// Read a day's record without creating it.
    pub fn lookup(store: &dyn LedgerStore, date: NaiveDate) -> Result<Option<DayRecord>> {
        load_record(store, &RecordKey::Day(date))
    }

    pub fn record(&self) -> &DayRecord {
        &self.record
    }

    pub fn add_time_studied(&mut self, studied: Duration) -> Result<()> {
        let next = DayRecord {
            time_studied_today: self.record.time_studied_today.saturating_add(studied),
            ..self.record.clone()
        };
        self.commit(next)
    }

    /// Credit a closed session in a single write.
    pub fn add_session(&mut self, studied: Duration, delta: i64) -> Result<()> {
        let next = DayRecord {
            time_studied_today: self.record.time_studied_today.saturating_add(studied),
            todays_balance_delta: self.record.todays_balance_delta.saturating_add(delta),
            ..self.record.clone()
        };
        self.commit(next)
    }

    /// Add a signed coin delta; the day total may go negative.
    pub fn add_funds(&mut self, delta: i64) -> Result<()> {
        let next = DayRecord {
            todays_balance_delta: self.record.todays_balance_delta.saturating_add(delta),
            ..self.record.clone()
        };
        self.commit(next)
    }

    fn commit(&mut self, next: DayRecord) -> Result<()> {
        save_record(self.store.as_ref(), &self.key, &next)?;
        self.record = next;
        Ok(())
    }
}
