use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted pet: the coin balance plus the cosmetic item in each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetRecord {
    pub balance: u64,
    pub hat: String,
    pub glasses: String,
    pub top: String,
    pub bed: String,
    pub table: String,
    pub nightstand: String,
    pub window: String,
}

impl PetRecord {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for PetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Balance: {} Coins", self.balance)?;
        writeln!(f, "Hat: {}", self.hat)?;
        writeln!(f, "Glasses: {}", self.glasses)?;
        writeln!(f, "Top: {}", self.top)?;
        writeln!(f, "Bed: {}", self.bed)?;
        writeln!(f, "Table: {}", self.table)?;
        writeln!(f, "Nightstand: {}", self.nightstand)?;
        write!(f, "Window: {}", self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pet_is_empty() {
        let pet = PetRecord::new();

        assert_eq!(pet.balance, 0);
        assert!(pet.hat.is_empty());
        assert!(pet.window.is_empty());
    }

    #[test]
    fn test_missing_cosmetics_default_to_empty() {
        let pet: PetRecord = serde_json::from_str(r#"{"balance": 12, "hat": "Beanie"}"#).unwrap();

        assert_eq!(pet.balance, 12);
        assert_eq!(pet.hat, "Beanie");
        assert_eq!(pet.glasses, "");
        assert_eq!(pet.nightstand, "");
    }

    #[test]
    fn test_negative_balance_is_rejected() {
        let result: Result<PetRecord, _> = serde_json::from_str(r#"{"balance": -5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_lists_every_slot() {
        let pet = PetRecord {
            balance: 7,
            top: "Hoodie".into(),
            ..PetRecord::default()
        };
        let text = pet.to_string();

        assert!(text.starts_with("Balance: 7 Coins\n"));
        assert!(text.contains("Top: Hoodie\n"));
        assert!(text.ends_with("Window: "));
        assert_eq!(text.lines().count(), 8);
    }
}
