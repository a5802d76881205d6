//! Merge sessions for wavemerge.
//!
//! A session is a TOML file naming the merge settings, an optional transfer
//! function, and the instruments to merge. Instrument waves live either in
//! separate wave files (resolved relative to the session file) or inline.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wavemerge_config::Session;
//!
//! let session = Session::load("bass.toml").unwrap();
//! let merged = session.merge(Path::new(".")).unwrap();
//! println!("{} frames of {} samples", merged.len(), session.nsamp);
//! ```

mod error;
mod session;

pub use error::ConfigError;
pub use session::{InstrumentConfig, Session, TransferSpec};
