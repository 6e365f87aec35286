use crate::constants::DEFAULT_BLACKLIST;

/// Source of the process names considered distracting. Consulted once per
/// monitoring tick, so implementations may change their answer over time.
pub trait BlacklistProvider: Send + Sync {
    fn names(&self) -> Vec<String>;
}

/// Fixed list, usually taken from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticBlacklist {
    names: Vec<String>,
}

impl StaticBlacklist {
    /// Build from configured names, dropping blanks and duplicates while
    /// keeping the original order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }
}

impl Default for StaticBlacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST)
    }
}

impl BlacklistProvider for StaticBlacklist {
    fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}
