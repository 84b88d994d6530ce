//! Confirmation summary shown on the terminal step.
//!
//! A pure derivation from the submitted draft; no stored state. Prices and
//! titles come from [`TicketTier`] so the summary can never disagree with
//! the selection step.

use crate::types::{RegistrationDraft, TicketTier};
use serde::{Deserialize, Serialize};

/// Conference name shown on the confirmation card
pub const EVENT_NAME: &str = "TechConf 2025";

/// Event dates shown on the confirmation card
pub const EVENT_DATES: &str = "June 15-17, 2025";

/// Venue shown on the confirmation card
pub const EVENT_LOCATION: &str = "San Francisco Convention Center";

/// Read-only summary of a completed registration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSummary {
    /// Selected tier
    pub tier: TicketTier,
    /// Tier title, e.g. `Premium`
    pub tier_title: String,
    /// Formatted price, e.g. `$799`
    pub price: String,
    /// Attendee full name
    pub attendee: String,
    /// Attendee email
    pub email: String,
    /// Attendee company, if given
    pub company: Option<String>,
}

impl ConfirmationSummary {
    /// Derive the summary from a draft
    #[must_use]
    pub fn from_draft(draft: &RegistrationDraft) -> Self {
        Self {
            tier: draft.ticket_type,
            tier_title: draft.ticket_type.title().to_string(),
            price: draft.ticket_type.price_display(),
            attendee: draft.full_name(),
            email: draft.email.clone(),
            company: if draft.company.is_empty() {
                None
            } else {
                Some(draft.company.clone())
            },
        }
    }
}

impl std::fmt::Display for ConfirmationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{EVENT_NAME} ({EVENT_DATES})")?;
        writeln!(f, "{EVENT_LOCATION}")?;
        writeln!(f, "Attendee: {} <{}>", self.attendee, self.email)?;
        if let Some(company) = &self.company {
            writeln!(f, "Company:  {company}")?;
        }
        write!(f, "Ticket:   {} ({})", self.tier_title, self.price)
    }
}
