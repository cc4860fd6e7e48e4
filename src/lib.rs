pub mod config;
pub mod error;
pub mod filter;
pub mod monitor;
pub mod output;
pub mod session;
pub mod signal;
pub mod supervisor;

pub use config::{FilterConfig, SessionConfig};
pub use error::{HarnessError, Result};
pub use filter::{LineCategory, LineFilter};
pub use session::{run_session, SessionOutcome};
pub use signal::SignalHandler;
pub use supervisor::{Supervisor, TerminationOutcome};
