//! Human readable notifications written to the log

use crate::monitor::{ChangeEvent, EventListener};
use crate::utils::{format_countdown, format_delta, format_points};

use super::view::{MonitorView, PhaseState};

/// Renders one summary line per commit, plus one line per verdict and
/// rating change
pub struct NotificationRenderer {
    handle: String,
    view: MonitorView,
    state_changed: bool,
    pending: Vec<String>,
}

impl NotificationRenderer {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            view: MonitorView::default(),
            state_changed: false,
            pending: Vec::new(),
        }
    }

    /// Summary of the current view
    pub fn summary_line(&self) -> String {
        let view = &self.view;
        let mut line = format!("{} • {} | {}", view.contest_name, self.handle, view.phase);

        match view.phase_state {
            PhaseState::SystemTesting { percentage: Some(p) } => line.push_str(&format!(" {}%", p)),
            PhaseState::Coding { ends_at: Some(ends_at) } => {
                let left = (ends_at - crate::utils::now_utc()).num_seconds();
                line.push_str(&format!(" {}", format_countdown(left)));
            }
            _ => {}
        }

        if !view.has_row() {
            line.push_str(" | not participated");
            return line;
        }

        let marker = if view.participation.is_contestant() { "" } else { "*" };
        match view.rank {
            Some(rank) => line.push_str(&format!(" | rank: {}{}", marker, rank)),
            None => line.push_str(" | rank: -"),
        }
        line.push_str(&format!(" • points: {}", format_points(view.points)));

        let symbols = view.problem_symbols();
        if !symbols.is_empty() {
            let cells: Vec<String> = symbols
                .into_iter()
                .map(|(problem, symbol)| format!("{}:{}", problem, symbol))
                .collect();
            line.push_str(" | ");
            line.push_str(&cells.join(" "));
        }

        line
    }

    /// Line for an event that is announced on its own, if any
    pub fn event_line(event: &ChangeEvent) -> Option<String> {
        match event {
            ChangeEvent::SystemTestResultForSubmission { problem, verdict, .. } => {
                Some(format!("Problem {}: {}", problem, verdict))
            }
            ChangeEvent::RatingChanged(change) => Some(format!(
                "{} → {} ({}), rank {}",
                change.old_rating,
                change.new_rating,
                format_delta(change.delta()),
                change.rank
            )),
            _ => None,
        }
    }
}

impl EventListener for NotificationRenderer {
    fn on_event(&mut self, event: &ChangeEvent) {
        self.view.apply(event);
        match Self::event_line(event) {
            Some(line) => self.pending.push(line),
            None => self.state_changed = true,
        }
    }

    fn on_commit(&mut self) {
        if std::mem::take(&mut self.state_changed) {
            tracing::info!(target: "cfwatch::notify", "{}", self.summary_line());
        }
        for line in self.pending.drain(..) {
            tracing::info!(target: "cfwatch::notify", "{}", line);
        }
    }
}
