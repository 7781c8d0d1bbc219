mod actions;
mod cdp;
mod driver;
mod error;
mod runner;
mod selectors;
mod session;
mod workflow;

pub use actions::{ActionExecutor, ActionResult};
pub use cdp::CdpDriver;
pub use driver::UiDriver;
pub use error::{Error, Result};
pub use runner::{BatchRunner, RunOutcome};
pub use selectors::SelectorSet;
pub use session::SessionManager;
pub use workflow::ConnectionWorkflow;

#[cfg(test)]
mod testutil;
