use super::monitor::{self, MonitorConfig};
use super::{SessionMode, SessionPhase, SessionState, SessionSummary};
use crate::accounts::AccountBook;
use crate::blacklist::BlacklistProvider;
use crate::clock::Clock;
use crate::error::{AppError, Result};
use crate::foreground::Foreground;
use crate::models::{DayRecord, PetRecord};
use crate::platform::ProcessSampler;
use crate::reward::coins_earned;
use crate::safe_lock;
use crate::store::LedgerStore;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FOCUS_STARTED: &str = "Focus Mode Engaged! It is time to work both hard and smart. Good luck...";
const CASUAL_STARTED: &str = "Casual Mode Engaged! Distractions:";

/// Collaborators a controller is built from.
pub struct ControllerParts {
    pub store: Arc<dyn LedgerStore>,
    pub clock: Arc<dyn Clock>,
    pub sampler: Arc<dyn ProcessSampler>,
    pub blacklist: Arc<dyn BlacklistProvider>,
    pub foreground: Arc<dyn Foreground>,
    pub poll_interval: Duration,
}

/// One running session, shared between the controller and its monitoring
/// thread. Settlement happens at most once, from whichever side ends it.
pub(crate) struct Session {
    state: SessionState,
    accounts: Arc<Mutex<AccountBook>>,
    foreground: Arc<dyn Foreground>,
    settlement: Mutex<Settlement>,
}

/// Timers read when the session closed, and the summary once the accounts
/// accepted them. A failed settlement keeps the captured timers for retry.
#[derive(Default)]
struct Settlement {
    captured: Option<(Duration, Duration)>,
    summary: Option<SessionSummary>,
}

impl Session {
    pub(crate) fn state(&self) -> &SessionState {
        &self.state
    }

    pub(crate) fn foreground(&self) -> &dyn Foreground {
        self.foreground.as_ref()
    }

    /// Stop the session, capture its timers and credit the accounts. Once
    /// that succeeds, later calls return the same summary without touching
    /// the accounts; after a failure they retry with the captured timers.
    pub(crate) fn finalize(&self) -> Result<SessionSummary> {
        let mut settlement = safe_lock(&self.settlement, "Settlement");
        if let Some(summary) = settlement.summary.as_ref() {
            return Ok(summary.clone());
        }

        self.state.request_stop();
        let mode = self.state.mode();
        let (time_studied, distracted) = *settlement
            .captured
            .get_or_insert_with(|| self.state.capture());
        let net_time = time_studied.saturating_sub(distracted);
        let coins = coins_earned(net_time);

        let balance = {
            let mut accounts = safe_lock(&self.accounts, "Accounts");
            accounts.settle(time_studied, coins)?;
            accounts.balance()
        };

        let summary = SessionSummary {
            mode,
            time_studied,
            time_distracted: (mode == SessionMode::Casual).then_some(distracted),
            net_time,
            coins_earned: coins,
            balance,
        };
        info!(
            "Session closed ({mode} mode): studied {time_studied:?}, earned {coins} coins"
        );

        settlement.summary = Some(summary.clone());
        self.foreground.report_final_summary(&summary);
        Ok(summary)
    }
}

struct ActiveSession {
    session: Arc<Session>,
    /// `None` once joined; the session stays here until it is settled.
    worker: Option<JoinHandle<()>>,
    panicked: bool,
}

impl ActiveSession {
    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Monitoring thread panicked");
                self.panicked = true;
            }
        }
    }
}

/// Starts and stops study sessions and owns the accounts they pay into.
pub struct SessionController {
    clock: Arc<dyn Clock>,
    sampler: Arc<dyn ProcessSampler>,
    blacklist: Arc<dyn BlacklistProvider>,
    foreground: Arc<dyn Foreground>,
    poll_interval: Duration,
    accounts: Arc<Mutex<AccountBook>>,
    active: Option<ActiveSession>,
}

impl SessionController {
    pub fn new(parts: ControllerParts) -> Result<Self> {
        let accounts = AccountBook::open(parts.store, Arc::clone(&parts.clock))?;

        Ok(Self {
            clock: parts.clock,
            sampler: parts.sampler,
            blacklist: parts.blacklist,
            foreground: parts.foreground,
            poll_interval: parts.poll_interval,
            accounts: Arc::new(Mutex::new(accounts)),
            active: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.session.state().is_running())
    }

    pub fn phase(&self) -> SessionPhase {
        self.active
            .as_ref()
            .map_or(SessionPhase::Idle, |active| active.session.state().phase())
    }

    pub fn balance(&self) -> u64 {
        safe_lock(&self.accounts, "Accounts").balance()
    }

    pub fn pet(&self) -> PetRecord {
        safe_lock(&self.accounts, "Accounts").pet().clone()
    }

    pub fn today(&self) -> Result<DayRecord> {
        safe_lock(&self.accounts, "Accounts").today()
    }

    pub fn review(&self, date: NaiveDate) -> Result<Option<DayRecord>> {
        safe_lock(&self.accounts, "Accounts").review(date)
    }

    pub fn spend(&self, amount: u64) -> Result<bool> {
        safe_lock(&self.accounts, "Accounts").spend(amount)
    }

    /// Start a session and its monitoring thread.
    pub fn start(&mut self, mode: SessionMode) -> Result<()> {
        if self.is_running() {
            return Err(AppError::SessionActive);
        }
        self.reap()?;

        let session = Arc::new(Session {
            state: SessionState::begin(mode, &self.clock),
            accounts: Arc::clone(&self.accounts),
            foreground: Arc::clone(&self.foreground),
            settlement: Mutex::new(Settlement::default()),
        });

        let config = MonitorConfig {
            sampler: Arc::clone(&self.sampler),
            blacklist: Arc::clone(&self.blacklist),
            poll_interval: self.poll_interval,
        };

        self.foreground.report_status(match mode {
            SessionMode::Focus => FOCUS_STARTED,
            SessionMode::Casual => CASUAL_STARTED,
        });

        let worker = {
            let session = Arc::clone(&session);
            thread::Builder::new()
                .name("study-monitor".into())
                .spawn(move || monitor::run(&session, &config))
                .map_err(AppError::Spawn)?
        };

        info!("Started {mode} session");
        self.active = Some(ActiveSession {
            session,
            worker: Some(worker),
            panicked: false,
        });
        Ok(())
    }

    /// Stop the running session, wait for its monitoring thread, and return
    /// its summary. If the thread already ended the session on its own, that
    /// summary is returned instead. When the accounts cannot be written the
    /// session is kept, and a later `stop` retries with the same timings.
    pub fn stop(&mut self) -> Result<SessionSummary> {
        let active = self.active.as_mut().ok_or(AppError::NoActiveSession)?;

        active.session.state().request_stop();
        if active.session.state().handshake().force_terminate() {
            info!("Cancelled outstanding distraction prompt");
        }
        active.join();

        let summary = active.session.finalize()?;
        let panicked = active.panicked;
        self.active = None;

        if panicked {
            return Err(AppError::WorkerPanicked);
        }
        Ok(summary)
    }

    /// Teardown: end any session without leaving the monitoring thread
    /// blocked on an unanswered prompt.
    pub fn shutdown(&mut self) -> Result<Option<SessionSummary>> {
        if self.active.is_none() {
            return Ok(None);
        }
        self.stop().map(Some)
    }

    /// Join and settle a session whose monitoring thread already ended it.
    fn reap(&mut self) -> Result<()> {
        let Some(finished) = self.active.as_mut() else {
            return Ok(());
        };
        finished.join();
        if let Err(e) = finished.session.finalize() {
            warn!("Previous session is still unsettled: {e}");
            return Err(e);
        }
        self.active = None;
        Ok(())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!("Failed to shut down session: {e}");
        }
    }
}
