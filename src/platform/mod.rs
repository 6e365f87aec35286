pub mod process_table;
pub mod types;

pub use types::{name_matches, ProcessSampler, RunningProcess};

pub use process_table::SysinfoSampler as NativeSampler;
