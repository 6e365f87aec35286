//! Shared test utilities.
//!
//! A manual clock, a scripted process table and a foreground that forwards
//! every callback to channels.

#![cfg(test)]

use crate::clock::Clock;
use crate::error::{AppError, Result};
use crate::foreground::{DistractionPrompt, Foreground};
use crate::platform::{name_matches, ProcessSampler, RunningProcess};
use crate::session::{DecisionReply, SessionSummary};
use crate::store::{FileStore, LedgerStore, RecordKey};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};
use tempfile::{tempdir, TempDir};

/// Create a file store in a temporary directory.
///
/// The TempDir must be kept alive for the duration of the test.
pub fn setup_test_store() -> (FileStore, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test store");
    let store = FileStore::open(dir.path()).expect("Failed to open test store");
    (store, dir)
}

pub fn setup_shared_store() -> (Arc<dyn LedgerStore>, TempDir) {
    let (store, dir) = setup_test_store();
    (Arc::new(store), dir)
}

/// Store that can be told to reject day record writes. Each rejected key is
/// reported on the receiver returned by `wrap`.
pub struct FailingStore {
    inner: Arc<dyn LedgerStore>,
    fail_days: AtomicBool,
    rejected_tx: Mutex<Sender<RecordKey>>,
}

impl FailingStore {
    pub fn wrap(inner: Arc<dyn LedgerStore>) -> (Arc<Self>, Receiver<RecordKey>) {
        let (tx, rx) = channel();
        let store = Arc::new(Self {
            inner,
            fail_days: AtomicBool::new(false),
            rejected_tx: Mutex::new(tx),
        });
        (store, rx)
    }

    pub fn fail_day_writes(&self, fail: bool) {
        self.fail_days.store(fail, Ordering::SeqCst);
    }
}

impl LedgerStore for FailingStore {
    fn exists(&self, key: &RecordKey) -> bool {
        self.inner.exists(key)
    }

    fn read(&self, key: &RecordKey) -> Result<Vec<u8>> {
        self.inner.read(key)
    }

    fn write(&self, key: &RecordKey, bytes: &[u8]) -> Result<()> {
        if matches!(key, RecordKey::Day(_)) && self.fail_days.load(Ordering::SeqCst) {
            let _ = self.rejected_tx.lock().unwrap().send(*key);
            return Err(AppError::io(
                PathBuf::from(key.to_string()),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "writes disabled"),
            ));
        }
        self.inner.write(key, bytes)
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::on(NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"))
    }

    pub fn on(today: NaiveDate) -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            today: Mutex::new(today),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }

    pub fn set_today(&self, today: NaiveDate) {
        *self.today.lock().unwrap() = today;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().unwrap()
    }

    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }
}

/// In-memory process table. Terminated processes disappear from the table
/// and are reported on the receiver returned by `new`.
pub struct FakeSampler {
    processes: Mutex<Vec<RunningProcess>>,
    next_pid: AtomicU32,
    ticks: Mutex<u64>,
    ticked: Condvar,
    refused: Mutex<HashSet<u32>>,
    terminated_tx: Mutex<Sender<RunningProcess>>,
}

impl FakeSampler {
    pub fn new() -> (Arc<Self>, Receiver<RunningProcess>) {
        let (tx, rx) = channel();
        let sampler = Arc::new(Self {
            processes: Mutex::new(Vec::new()),
            next_pid: AtomicU32::new(1000),
            ticks: Mutex::new(0),
            ticked: Condvar::new(),
            refused: Mutex::new(HashSet::new()),
            terminated_tx: Mutex::new(tx),
        });
        (sampler, rx)
    }

    pub fn spawn(&self, name: &str) -> RunningProcess {
        let process = RunningProcess {
            pid: self.next_pid.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
        };
        self.processes.lock().unwrap().push(process.clone());
        process
    }

    pub fn remove(&self, process: &RunningProcess) {
        self.processes.lock().unwrap().retain(|p| p.pid != process.pid);
    }

    /// Make `terminate` fail for this process; it keeps running.
    pub fn refuse_termination(&self, process: &RunningProcess) {
        self.refused.lock().unwrap().insert(process.pid);
    }

    /// Wait until `n` more refreshes have started.
    pub fn wait_for_ticks(&self, n: u64, timeout: Duration) -> bool {
        let ticks = self.ticks.lock().unwrap();
        let target = *ticks + n;
        let (_guard, result) = self
            .ticked
            .wait_timeout_while(ticks, timeout, |t| *t < target)
            .unwrap();
        !result.timed_out()
    }
}

impl ProcessSampler for FakeSampler {
    fn refresh(&self) {
        *self.ticks.lock().unwrap() += 1;
        self.ticked.notify_all();
    }

    fn find_by_name(&self, name: &str) -> Vec<RunningProcess> {
        self.processes
            .lock()
            .unwrap()
            .iter()
            .filter(|p| name_matches(&p.name, name))
            .cloned()
            .collect()
    }

    fn terminate(&self, process: &RunningProcess) -> Result<()> {
        if self.refused.lock().unwrap().contains(&process.pid) {
            return Err(AppError::TerminationRefused { pid: process.pid });
        }
        let mut processes = self.processes.lock().unwrap();
        let before = processes.len();
        processes.retain(|p| p.pid != process.pid);
        if processes.len() == before {
            return Err(AppError::ProcessNotFound { pid: process.pid });
        }
        drop(processes);
        let _ = self.terminated_tx.lock().unwrap().send(process.clone());
        Ok(())
    }
}

pub struct ForegroundEvents {
    pub status: Receiver<String>,
    pub prompt: Receiver<(DistractionPrompt, DecisionReply)>,
    pub summary: Receiver<SessionSummary>,
}

/// Foreground that forwards every callback to the test thread.
pub struct RecordingForeground {
    status: Mutex<Sender<String>>,
    prompt: Mutex<Sender<(DistractionPrompt, DecisionReply)>>,
    summary: Mutex<Sender<SessionSummary>>,
}

impl RecordingForeground {
    pub fn new() -> (Arc<Self>, ForegroundEvents) {
        let (status_tx, status) = channel();
        let (prompt_tx, prompt) = channel();
        let (summary_tx, summary) = channel();
        let foreground = Arc::new(Self {
            status: Mutex::new(status_tx),
            prompt: Mutex::new(prompt_tx),
            summary: Mutex::new(summary_tx),
        });
        (foreground, ForegroundEvents { status, prompt, summary })
    }
}

impl Foreground for RecordingForeground {
    fn report_status(&self, text: &str) {
        let _ = self.status.lock().unwrap().send(text.to_string());
    }

    fn prompt_yes_no(&self, prompt: DistractionPrompt, reply: DecisionReply) {
        let _ = self.prompt.lock().unwrap().send((prompt, reply));
    }

    fn report_final_summary(&self, summary: &SessionSummary) {
        let _ = self.summary.lock().unwrap().send(summary.clone());
    }
}
