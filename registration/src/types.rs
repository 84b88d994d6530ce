//! Domain types for the registration wizard.
//!
//! The wizard is a linear three-step form: ticket selection, attendee
//! information, confirmation. A [`RegistrationDraft`] collects the user's
//! input for a single registration attempt and [`RegistrationState`] tracks
//! where in the flow that attempt currently is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conference ticket tier
///
/// Only these three tiers are representable; there is no escape hatch for
/// other values. The price mapping lives here as the single source of truth
/// so the selection step and the confirmation step can never drift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketTier {
    /// Standard conference access
    #[default]
    Standard,
    /// Premium access with workshops and networking
    Premium,
    /// Full VIP experience
    Vip,
}

impl TicketTier {
    /// All tiers, in catalog order
    pub const ALL: [TicketTier; 3] = [TicketTier::Standard, TicketTier::Premium, TicketTier::Vip];

    /// Ticket price in whole display-currency units (USD)
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Self::Standard => 499,
            Self::Premium => 799,
            Self::Vip => 1299,
        }
    }

    /// Human-readable tier title as shown in the catalog and summary
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Vip => "VIP",
        }
    }

    /// Formatted price for display, e.g. `$799`
    #[must_use]
    pub fn price_display(self) -> String {
        format!("${}", self.price())
    }

    /// The lowercase wire token (`standard`, `premium`, `vip`)
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Vip => "vip",
        }
    }
}

impl std::fmt::Display for TicketTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_token())
    }
}

impl std::str::FromStr for TicketTier {
    type Err = UnknownTicketTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "vip" => Ok(Self::Vip),
            other => Err(UnknownTicketTier(other.to_string())),
        }
    }
}

/// Error for a ticket tier token outside the three defined tiers
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown ticket tier: {0:?}")]
pub struct UnknownTicketTier(pub String);

/// The four text fields of the registration draft
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    /// Attendee first name (required)
    FirstName,
    /// Attendee last name (required)
    LastName,
    /// Attendee email address (required)
    Email,
    /// Attendee company (optional)
    Company,
}

impl DraftField {
    /// Whether the field must be non-empty before leaving the information step
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Company)
    }

    /// The form field name, as used by the hosting input controls
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Company => "company",
        }
    }
}

impl std::fmt::Display for DraftField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Validation gate failures
///
/// These are never surfaced to the user as error objects; the presentation
/// layer simply disables the `Next`/`Submit` affordance. They are modeled
/// as named conditions so tests can assert exactly which gate blocked an
/// operation.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// A required field is empty
    #[error("required field {0} is empty")]
    MissingRequiredField(DraftField),

    /// The terms-acceptance toggle is off at submission time
    #[error("terms and conditions not accepted")]
    TermsNotAccepted,
}

/// The in-progress, not-yet-submitted input for a single registration attempt
///
/// Created fresh when the wizard mounts and discarded on reset or teardown.
/// Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    /// Attendee first name
    pub first_name: String,
    /// Attendee last name
    pub last_name: String,
    /// Attendee email address
    pub email: String,
    /// Attendee company (optional)
    pub company: String,
    /// Selected ticket tier
    pub ticket_type: TicketTier,
    /// Terms-acceptance toggle on the confirmation step
    pub terms_accepted: bool,
}

impl RegistrationDraft {
    /// Set one of the four text fields
    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::FirstName => self.first_name = value,
            DraftField::LastName => self.last_name = value,
            DraftField::Email => self.email = value,
            DraftField::Company => self.company = value,
        }
    }

    /// Read one of the four text fields
    #[must_use]
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::Company => &self.company,
        }
    }

    /// Attendee full name, e.g. `Ada Lovelace`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the information-step gate: all required fields non-empty
    ///
    /// Returns the first missing required field, in form order.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingRequiredField`] naming the first empty
    /// required field.
    pub fn validate_information(&self) -> Result<(), ValidationError> {
        for field in [DraftField::FirstName, DraftField::LastName, DraftField::Email] {
            if self.field(field).is_empty() {
                return Err(ValidationError::MissingRequiredField(field));
            }
        }
        Ok(())
    }
}

/// Loose well-formedness check for an email address
///
/// This is a boundary concern of the email input field, not a gate on
/// wizard navigation: advancing past the information step only requires
/// the field to be non-empty.
#[must_use]
pub fn email_looks_well_formed(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

/// The three wizard steps, in order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Step 0: choose a ticket tier
    #[default]
    SelectTicket,
    /// Step 1: attendee information
    Information,
    /// Step 2: read-only summary plus terms acceptance
    Confirmation,
}

impl WizardStep {
    /// Zero-based step index, as shown by the stepper control
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::SelectTicket => 0,
            Self::Information => 1,
            Self::Confirmation => 2,
        }
    }

    /// Step label shown by the stepper control
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SelectTicket => "Select Ticket",
            Self::Information => "Your Information",
            Self::Confirmation => "Confirmation",
        }
    }

    /// The following step, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::SelectTicket => Some(Self::Information),
            Self::Information => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    /// The preceding step, if any
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::SelectTicket => None,
            Self::Information => Some(Self::SelectTicket),
            Self::Confirmation => Some(Self::Information),
        }
    }
}

/// Submission lifecycle of the current registration attempt
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// The user is still filling in the form
    #[default]
    Editing,
    /// A submission is in flight (simulated network round trip)
    Submitting,
    /// Terminal state: the registration went through
    Submitted,
}

/// Process-local wizard state; one instance per wizard mount
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    /// Current wizard step
    pub step: WizardStep,
    /// Submission lifecycle
    pub status: SubmissionStatus,
    /// The in-progress registration input
    pub draft: RegistrationDraft,
    /// The condition that blocked the most recent gated operation, if any
    ///
    /// Purely informational; the user-visible behavior is a disabled
    /// affordance, not an error message.
    pub last_gate_failure: Option<ValidationError>,
}

impl RegistrationState {
    /// Whether the `Next` affordance is enabled on the current step
    #[must_use]
    pub fn can_advance(&self) -> bool {
        if self.status != SubmissionStatus::Editing {
            return false;
        }
        match self.step {
            // A tier is always selected, nothing to validate
            WizardStep::SelectTicket => true,
            WizardStep::Information => self.draft.validate_information().is_ok(),
            // Leaving the confirmation step forward is submission, not navigation
            WizardStep::Confirmation => false,
        }
    }

    /// Whether the `Back` affordance is enabled on the current step
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.status == SubmissionStatus::Editing && self.step.previous().is_some()
    }

    /// Whether the `Submit` affordance is enabled
    ///
    /// Requires the confirmation step, accepted terms, and no submission
    /// already in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Confirmation
            && self.draft.terms_accepted
            && self.status == SubmissionStatus::Editing
    }

    /// Reset to a fresh wizard: defaults, step 0, editing
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tier_prices_match_catalog() {
        assert_eq!(TicketTier::Standard.price(), 499);
        assert_eq!(TicketTier::Premium.price(), 799);
        assert_eq!(TicketTier::Vip.price(), 1299);
    }

    #[test]
    fn tier_display_and_parse_roundtrip() {
        for tier in TicketTier::ALL {
            let token = tier.to_string();
            assert_eq!(TicketTier::from_str(&token), Ok(tier));
        }
        assert!(TicketTier::from_str("platinum").is_err());
    }

    #[test]
    fn tier_titles() {
        assert_eq!(TicketTier::Standard.title(), "Standard");
        assert_eq!(TicketTier::Premium.title(), "Premium");
        assert_eq!(TicketTier::Vip.title(), "VIP");
        assert_eq!(TicketTier::Premium.price_display(), "$799");
    }

    #[test]
    fn default_draft_is_empty_standard_unaccepted() {
        let draft = RegistrationDraft::default();
        assert_eq!(draft.first_name, "");
        assert_eq!(draft.last_name, "");
        assert_eq!(draft.email, "");
        assert_eq!(draft.company, "");
        assert_eq!(draft.ticket_type, TicketTier::Standard);
        assert!(!draft.terms_accepted);
    }

    #[test]
    fn validate_information_reports_first_missing_field() {
        let mut draft = RegistrationDraft::default();
        assert_eq!(
            draft.validate_information(),
            Err(ValidationError::MissingRequiredField(DraftField::FirstName))
        );

        draft.set_field(DraftField::FirstName, "Ada".into());
        assert_eq!(
            draft.validate_information(),
            Err(ValidationError::MissingRequiredField(DraftField::LastName))
        );

        draft.set_field(DraftField::LastName, "Lovelace".into());
        assert_eq!(
            draft.validate_information(),
            Err(ValidationError::MissingRequiredField(DraftField::Email))
        );

        // Company stays optional
        draft.set_field(DraftField::Email, "ada@example.com".into());
        assert_eq!(draft.validate_information(), Ok(()));
    }

    #[test]
    fn set_and_read_fields() {
        let mut draft = RegistrationDraft::default();
        draft.set_field(DraftField::Company, "Analytical Engines Ltd".into());
        assert_eq!(draft.field(DraftField::Company), "Analytical Engines Ltd");
        assert_eq!(draft.field(DraftField::FirstName), "");
    }

    #[test]
    fn full_name_concatenates() {
        let mut draft = RegistrationDraft::default();
        draft.set_field(DraftField::FirstName, "Ada".into());
        draft.set_field(DraftField::LastName, "Lovelace".into());
        assert_eq!(draft.full_name(), "Ada Lovelace");
    }

    #[test]
    fn email_well_formedness_boundary() {
        assert!(email_looks_well_formed("ada@example.com"));
        assert!(!email_looks_well_formed(""));
        assert!(!email_looks_well_formed("ada"));
        assert!(!email_looks_well_formed("@example.com"));
        assert!(!email_looks_well_formed("ada@example"));
        assert!(!email_looks_well_formed("ada lovelace@example.com"));
    }

    #[test]
    fn step_ordering_is_linear() {
        assert_eq!(WizardStep::SelectTicket.next(), Some(WizardStep::Information));
        assert_eq!(WizardStep::Information.next(), Some(WizardStep::Confirmation));
        assert_eq!(WizardStep::Confirmation.next(), None);
        assert_eq!(WizardStep::SelectTicket.previous(), None);
        assert_eq!(WizardStep::Confirmation.index(), 2);
    }

    #[test]
    fn fresh_state_gates() {
        let state = RegistrationState::default();
        // Step 0 always advances: a tier default is always selected
        assert!(state.can_advance());
        assert!(!state.can_go_back());
        assert!(!state.can_submit());
    }

    #[test]
    fn submit_gate_requires_terms_and_editing() {
        let mut state = RegistrationState {
            step: WizardStep::Confirmation,
            ..RegistrationState::default()
        };
        assert!(!state.can_submit());

        state.draft.terms_accepted = true;
        assert!(state.can_submit());

        state.status = SubmissionStatus::Submitting;
        assert!(!state.can_submit());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = RegistrationState {
            step: WizardStep::Confirmation,
            status: SubmissionStatus::Submitted,
            ..RegistrationState::default()
        };
        state.draft.first_name = "Ada".into();
        state.reset();
        assert_eq!(state, RegistrationState::default());
    }
}
