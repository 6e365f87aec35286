use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningProcess {
    pub pid: u32,
    pub name: String,
}

pub trait ProcessSampler: Send + Sync {
    /// Take a fresh snapshot of the process table. Called once per tick
    /// before any lookups.
    fn refresh(&self) {}

    /// Processes in the latest snapshot whose name matches `name`.
    fn find_by_name(&self, name: &str) -> Vec<RunningProcess>;

    fn terminate(&self, process: &RunningProcess) -> Result<()>;
}

/// Compare a process name against a blacklist entry, ignoring case and a
/// trailing `.exe`.
pub fn name_matches(process_name: &str, wanted: &str) -> bool {
    fn stem(name: &str) -> &str {
        let len = name.len();
        match name.get(len.saturating_sub(4)..) {
            Some(ext) if len > 4 && ext.eq_ignore_ascii_case(".exe") => name.get(..len - 4).unwrap_or(name),
            _ => name,
        }
    }

    stem(process_name).eq_ignore_ascii_case(stem(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches() {
        assert!(name_matches("chrome", "chrome"));
        assert!(name_matches("Discord", "discord"));
        assert!(name_matches("Spotify.exe", "Spotify"));
        assert!(name_matches("spotify", "Spotify.EXE"));
        assert!(!name_matches("chromedriver", "chrome"));
        assert!(!name_matches(".exe", "chrome"));
    }
}
