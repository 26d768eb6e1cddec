//! Built-in event listeners

pub mod notification;
pub mod view;

pub use notification::NotificationRenderer;
pub use view::{LiveView, MonitorView, PhaseState, ProblemView};
