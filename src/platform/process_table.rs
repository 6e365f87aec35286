use super::{name_matches, ProcessSampler, RunningProcess};
use crate::error::{AppError, Result};
use crate::safe_lock;
use log::debug;
use std::sync::Mutex;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Native process table backed by `sysinfo`.
pub struct SysinfoSampler {
    system: Mutex<System>,
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All);
        Self {
            system: Mutex::new(system),
        }
    }
}

impl ProcessSampler for SysinfoSampler {
    fn refresh(&self) {
        let mut system = safe_lock(&self.system, "Process table");
        system.refresh_processes(ProcessesToUpdate::All);
        debug!("Refreshed process table ({} entries)", system.processes().len());
    }

    fn find_by_name(&self, name: &str) -> Vec<RunningProcess> {
        let own_pid = std::process::id();
        let system = safe_lock(&self.system, "Process table");

        system
            .processes()
            .iter()
            .filter(|(pid, _)| pid.as_u32() != own_pid)
            .filter_map(|(pid, process)| {
                let process_name = process.name().to_string_lossy();
                name_matches(&process_name, name).then(|| RunningProcess {
                    pid: pid.as_u32(),
                    name: process_name.into_owned(),
                })
            })
            .collect()
    }

    fn terminate(&self, process: &RunningProcess) -> Result<()> {
        let system = safe_lock(&self.system, "Process table");
        let target = system
            .process(Pid::from_u32(process.pid))
            .ok_or(AppError::ProcessNotFound { pid: process.pid })?;

        if target.kill() {
            Ok(())
        } else {
            Err(AppError::TerminationRefused { pid: process.pid })
        }
    }
}
