//! # TechConf Registration
//!
//! The multi-step registration wizard for TechConf 2025.
//!
//! A linear three-step form state machine (ticket selection, attendee
//! information, confirmation) with per-step validation gating and a
//! terminal success state, built on the reducer architecture:
//!
//! - [`types`] — the registration draft, wizard steps, and validation gates
//! - [`reducer`] — the state machine as a pure [`Reducer`](techconf_core::reducer::Reducer)
//! - [`catalog`] — the injected read-only ticket catalog
//! - [`environment`] — clock, simulated submission latency, and the
//!   confirmation collaborator
//! - [`summary`] — the read-only confirmation summary
//! - [`config`] — explicit presentation settings (theme)
//!
//! ## Example
//!
//! ```no_run
//! use techconf_core::environment::SystemClock;
//! use techconf_registration::environment::RegistrationEnvironment;
//! use techconf_registration::reducer::{RegistrationAction, RegistrationReducer};
//! use techconf_registration::types::{RegistrationState, TicketTier};
//! use techconf_runtime::Store;
//!
//! # async fn example() -> Result<(), techconf_runtime::StoreError> {
//! let env = RegistrationEnvironment::new(SystemClock);
//! let store = Store::new(
//!     RegistrationState::default(),
//!     RegistrationReducer::new(),
//!     env,
//! );
//!
//! store.send(RegistrationAction::SelectTicket(TicketTier::Premium)).await?;
//! store.send(RegistrationAction::Advance).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod environment;
pub mod reducer;
pub mod summary;
pub mod types;

pub use catalog::{StaticCatalog, TicketCatalog, TicketOption};
pub use config::{Settings, Theme};
pub use environment::{ConfirmationSender, RegistrationEnvironment};
pub use reducer::{RegistrationAction, RegistrationReducer, SUBMIT_EFFECT};
pub use summary::ConfirmationSummary;
pub use types::{
    DraftField, RegistrationDraft, RegistrationState, SubmissionStatus, TicketTier,
    ValidationError, WizardStep,
};
