//! # Deskbot
//!
//! A headless client for EDOPro duel servers.
//!
//! Deskbot joins (or hosts) a room, takes its seat, submits a deck, and
//! plays the duel through a pluggable decision engine. This crate ties the
//! layers together: transport → protocol → session → duel.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), deskbot::DeskbotError> {
//! let config = deskbot::ClientConfig::default();
//! let end = deskbot::run(&config).await?;
//! println!("session ended: {}", end.reason);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod deck;
mod error;

pub use client::{SessionEnd, build_session, run, run_session};
pub use config::ClientConfig;
pub use deck::{load_deck, load_script, parse_ydk};
pub use error::DeskbotError;
