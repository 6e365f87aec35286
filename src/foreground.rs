//! Callbacks into whatever presents the session to the user.

use crate::session::{DecisionReply, SessionSummary};

/// Yes/no question raised when a distraction is found in focus mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistractionPrompt {
    pub process_name: String,
    pub matched: usize,
    pub title: String,
    pub body: String,
    pub yes_label: String,
    pub no_label: String,
}

impl DistractionPrompt {
    pub fn for_process(process_name: &str, matched: usize) -> Self {
        Self {
            process_name: process_name.to_string(),
            matched,
            title: "Distraction Detected".into(),
            body: format!("Are you sure you want to terminate {process_name}?"),
            yes_label: "Terminate process and continue studying".into(),
            no_label: "Stop studying".into(),
        }
    }
}

/// The user-facing side of a session.
///
/// Every method may be called from the monitoring thread and must not
/// block on user input. `prompt_yes_no` in particular should queue the
/// question and answer later through `reply`; until it does, the
/// monitoring loop stays paused.
pub trait Foreground: Send + Sync {
    fn report_status(&self, text: &str);

    fn prompt_yes_no(&self, prompt: DistractionPrompt, reply: DecisionReply);

    fn report_final_summary(&self, summary: &SessionSummary);
}
