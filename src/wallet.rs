use crate::error::Result;
use crate::models::PetRecord;
use crate::store::{load_record, save_record, LedgerStore, RecordKey};
use log::info;
use std::sync::Arc;

/// Coin balance of the pet, persisted after every mutation.
pub struct Wallet {
    store: Arc<dyn LedgerStore>,
    pet: PetRecord,
}

impl Wallet {
    /// Load the pet record, creating and saving an empty one if it is
    /// missing or unreadable.
    pub fn load(store: Arc<dyn LedgerStore>) -> Result<Self> {
        let pet = match load_record::<PetRecord>(store.as_ref(), &RecordKey::Pet)? {
            Some(pet) => pet,
            None => {
                info!("No pet record found, creating a new one");
                let pet = PetRecord::new();
                save_record(store.as_ref(), &RecordKey::Pet, &pet)?;
                pet
            }
        };

        Ok(Self { store, pet })
    }

    pub fn balance(&self) -> u64 {
        self.pet.balance
    }

    pub fn pet(&self) -> &PetRecord {
        &self.pet
    }

    /// Add coins, saturating at `u64::MAX`.
    pub fn deposit(&mut self, amount: u64) -> Result<()> {
        let balance = self.pet.balance.saturating_add(amount);
        self.commit(balance)
    }

    /// Remove coins. Returns `false` and leaves the balance untouched when
    /// `amount` exceeds it.
    pub fn withdraw(&mut self, amount: u64) -> Result<bool> {
        let Some(balance) = self.pet.balance.checked_sub(amount) else {
            return Ok(false);
        };
        self.commit(balance)?;
        Ok(true)
    }

    /// Persist the current record unchanged.
    pub fn save(&self) -> Result<()> {
        save_record(self.store.as_ref(), &RecordKey::Pet, &self.pet)
    }

    /// Put back a record taken before a mutation whose paired write failed.
    pub(crate) fn restore(&mut self, previous: PetRecord) -> Result<()> {
        save_record(self.store.as_ref(), &RecordKey::Pet, &previous)?;
        self.pet = previous;
        Ok(())
    }

    fn commit(&mut self, balance: u64) -> Result<()> {
        let next = PetRecord {
            balance,
            ..self.pet.clone()
        };
        save_record(self.store.as_ref(), &RecordKey::Pet, &next)?;
        self.pet = next;
        Ok(())
    }
}
