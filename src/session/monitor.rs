//! Background loop that samples the process table while a session runs.

use super::controller::Session;
use super::handshake::{Decision, DecisionReply};
use super::SessionMode;
use crate::blacklist::BlacklistProvider;
use crate::foreground::DistractionPrompt;
use crate::platform::{ProcessSampler, RunningProcess};
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub(crate) struct MonitorConfig {
    pub sampler: Arc<dyn ProcessSampler>,
    pub blacklist: Arc<dyn BlacklistProvider>,
    pub poll_interval: Duration,
}

pub(crate) fn run(session: &Session, config: &MonitorConfig) {
    let mode = session.state().mode();
    info!("Monitoring loop started ({mode} mode)");

    match mode {
        SessionMode::Focus => focus_loop(session, config),
        SessionMode::Casual => casual_loop(session, config),
    }

    info!("Monitoring loop exited ({mode} mode)");
}

fn focus_loop(session: &Session, config: &MonitorConfig) {
    while session.state().is_running() {
        config.sampler.refresh();

        for name in config.blacklist.names() {
            if !session.state().is_running() {
                return;
            }

            let matched = config.sampler.find_by_name(&name);
            if matched.is_empty() {
                continue;
            }

            info!("Distraction detected: {name} ({} processes)", matched.len());
            match ask_foreground(session, &name, matched.len()) {
                Decision::Resume => terminate_all(config.sampler.as_ref(), &matched),
                Decision::Terminate => {
                    if let Err(e) = session.finalize() {
                        error!("Failed to close session after distraction: {e}");
                    }
                    return;
                }
            }
        }

        thread::sleep(config.poll_interval);
    }
}

/// Pause the session, prompt, and block until the foreground answers.
fn ask_foreground(session: &Session, name: &str, matched: usize) -> Decision {
    let state = session.state();
    state.pause_elapsed();

    if !state.handshake().raise() {
        info!("Session is shutting down, not prompting for {name}");
        return Decision::Terminate;
    }

    session.foreground().prompt_yes_no(
        DistractionPrompt::for_process(name, matched),
        DecisionReply::new(Arc::clone(state.handshake())),
    );

    let decision = state.handshake().wait();
    info!("Distraction {name} resolved: {decision:?}");

    if decision == Decision::Resume {
        state.resume_elapsed();
    }
    decision
}

/// Best-effort: a process that already exited or refuses to die is skipped.
fn terminate_all(sampler: &dyn ProcessSampler, processes: &[RunningProcess]) {
    for process in processes {
        match sampler.terminate(process) {
            Ok(()) => info!("Terminated {} (pid {})", process.name, process.pid),
            Err(e) => debug!("Could not terminate {} (pid {}): {e}", process.name, process.pid),
        }
    }
}

fn casual_loop(session: &Session, config: &MonitorConfig) {
    let state = session.state();
    let mut distracting: HashMap<String, bool> = HashMap::new();
    let mut active = 0usize;

    while state.is_running() {
        config.sampler.refresh();

        for name in config.blacklist.names() {
            let running = !config.sampler.find_by_name(&name).is_empty();
            let flag = distracting.entry(name.clone()).or_insert(false);

            match (running, *flag) {
                (true, false) => {
                    *flag = true;
                    if active == 0 {
                        state.start_distraction();
                    }
                    active += 1;
                    info!("Distracted by {name}");
                    session.foreground().report_status(&format!("- {name}"));
                }
                (false, true) => {
                    *flag = false;
                    active = active.saturating_sub(1);
                    if active == 0 {
                        state.stop_distraction();
                    }
                    debug!("{name} no longer running");
                }
                (true, true) | (false, false) => {}
            }
        }

        thread::sleep(config.poll_interval);
    }
}
