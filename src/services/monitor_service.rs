//! Monitor lifecycle management

use std::collections::HashMap;

use futures::future::join_all;

use crate::api::Fetchers;
use crate::config::ScheduleConfig;
use crate::monitor::{ContestMonitor, EventListener, MonitorHandle, MonitorOutcome};

/// Runs at most one monitor per handle
#[derive(Debug)]
pub struct MonitorRegistry {
    fetchers: Fetchers,
    schedule: ScheduleConfig,
    monitors: HashMap<String, MonitorHandle>,
}

impl MonitorRegistry {
    pub fn new(fetchers: Fetchers, schedule: ScheduleConfig) -> Self {
        Self {
            fetchers,
            schedule,
            monitors: HashMap::new(),
        }
    }

    /// Start watching `handle` in `contest_id`.
    ///
    /// A monitor already running for the handle is stopped first, whatever
    /// contest it watches.
    pub async fn start(
        &mut self,
        handle: &str,
        contest_id: u32,
        listeners: Vec<Box<dyn EventListener>>,
    ) {
        if let Some(previous) = self.monitors.remove(handle) {
            tracing::info!(
                handle,
                contest_id = previous.contest_id(),
                "Replacing running monitor"
            );
            previous.stop().await;
        }

        let mut monitor =
            ContestMonitor::new(handle, contest_id, self.fetchers.clone(), self.schedule.clone());
        for listener in listeners {
            monitor.register_boxed(listener);
        }

        self.monitors.insert(handle.to_string(), monitor.start());
    }

    /// Stop the monitor of `handle`, if any
    pub async fn stop(&mut self, handle: &str) -> Option<MonitorOutcome> {
        let monitor = self.monitors.remove(handle)?;
        Some(monitor.stop().await)
    }

    /// Stop every monitor and wait for all of them
    pub async fn stop_all(&mut self) -> Vec<(String, MonitorOutcome)> {
        let stops = self.monitors.drain().map(|(_, monitor)| async move {
            let handle = monitor.handle().to_string();
            (handle, monitor.stop().await)
        });

        join_all(stops).await
    }

    /// Wait until the monitor of `handle` ends on its own
    pub async fn wait(&self, handle: &str) -> Option<MonitorOutcome> {
        Some(self.monitors.get(handle)?.finished().await)
    }

    pub fn contest_of(&self, handle: &str) -> Option<u32> {
        self.monitors.get(handle).map(MonitorHandle::contest_id)
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}
