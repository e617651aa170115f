pub mod command;
pub mod config;
pub mod controller;
pub mod news;
pub mod session;
pub mod terminal;
pub mod toast;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use command::Command;
pub use config::DashboardConfig;
pub use controller::{AnalyzeOutcome, Dashboard, DashboardError};
pub use news::{NewsPoller, NewsPollerHandle};
pub use session::{CurrentSignal, RequestToken, Session};
pub use terminal::TerminalView;
pub use toast::ToastBoard;
pub use view::{DashboardView, DisplayFields, ToastId};
