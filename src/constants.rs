// src/constants.rs

use std::time::Duration;

/// Seconds in one minute; coins are paid per whole minute
pub const SECS_PER_MINUTE: u64 = 60;

/// Date key format for day records (e.g. 10-19-2026)
pub const DATE_KEY_FORMAT: &str = "%m-%d-%Y";

/// Long date format used when showing a day record
pub const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Fixed key of the pet/wallet record
pub const PET_RECORD_KEY: &str = "PetSave";

/// Sub-directory holding one JSON file per calendar day
pub const DAY_RECORDS_DIR: &str = "Date Records";

/// Extension of every persisted record
pub const RECORD_EXTENSION: &str = "json";

/// Process names treated as distracting when no config overrides them
pub const DEFAULT_BLACKLIST: [&str; 3] = ["chrome", "Discord", "Spotify"];

/// Default pause between monitoring loop ticks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "STUDYBUDDY_DATA_DIR";

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";
