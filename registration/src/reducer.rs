//! The registration wizard reducer.
//!
//! A linear three-step state machine: ticket selection, attendee
//! information, confirmation, with per-step validation gating and a
//! terminal submitted state. Gated operations that fail their precondition
//! are no-ops; the hosting view renders them as disabled affordances using
//! [`RegistrationState::can_advance`] and friends, never as error dialogs.

use crate::environment::RegistrationEnvironment;
use crate::types::{
    RegistrationState, SubmissionStatus, TicketTier, ValidationError, WizardStep,
};
use std::sync::Arc;
use techconf_core::effect::Effect;
use techconf_core::environment::Clock;
use techconf_core::reducer::Reducer;
use techconf_core::{SmallVec, smallvec};

use crate::types::DraftField;

/// Cancellation id for the in-flight submission effect
///
/// Store shutdown cancels this registration, so a wizard torn down while
/// submitting never sees the delayed completion applied.
pub const SUBMIT_EFFECT: &str = "registration/submit";

/// All inputs to the registration wizard
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Choose a ticket tier on the selection step; always succeeds
    SelectTicket(TicketTier),

    /// Set one of the four text fields; always succeeds
    UpdateField {
        /// Which field to set
        field: DraftField,
        /// The new value
        value: String,
    },

    /// Toggle the terms-acceptance checkbox on the confirmation step
    SetTermsAccepted(bool),

    /// Move to the next step, if the current step's gate passes
    Advance,

    /// Move to the previous step; never clears entered data
    GoBack,

    /// Submit the registration from the confirmation step
    Submit,

    /// Internal: the simulated submission round trip finished
    ///
    /// Produced by the delay effect scheduled by [`RegistrationAction::Submit`].
    SubmissionCompleted,

    /// Start over after a successful submission ("register another attendee")
    ResetForm,
}

/// Reducer implementing the wizard state machine
///
/// Generic over the clock type to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> RegistrationReducer<C> {
    /// Create a new registration reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for RegistrationReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reducer for RegistrationReducer<C> {
    type State = RegistrationState;
    type Action = RegistrationAction;
    type Environment = RegistrationEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RegistrationAction::SelectTicket(tier) => {
                state.draft.ticket_type = tier;
                smallvec![Effect::None]
            },

            RegistrationAction::UpdateField { field, value } => {
                state.draft.set_field(field, value);
                smallvec![Effect::None]
            },

            RegistrationAction::SetTermsAccepted(accepted) => {
                state.draft.terms_accepted = accepted;
                smallvec![Effect::None]
            },

            RegistrationAction::Advance => {
                Self::advance(state);
                smallvec![Effect::None]
            },

            RegistrationAction::GoBack => {
                // Going back never clears entered data
                if state.can_go_back() {
                    if let Some(previous) = state.step.previous() {
                        state.step = previous;
                        state.last_gate_failure = None;
                    }
                }
                smallvec![Effect::None]
            },

            RegistrationAction::Submit => {
                if !state.can_submit() {
                    // Disabled affordance, not an error path. Record the
                    // gate for tests; the draft stays untouched.
                    if state.step == WizardStep::Confirmation
                        && state.status == SubmissionStatus::Editing
                        && !state.draft.terms_accepted
                    {
                        state.last_gate_failure = Some(ValidationError::TermsNotAccepted);
                    }
                    tracing::debug!(step = ?state.step, status = ?state.status, "Submit gated");
                    return smallvec![Effect::None];
                }

                state.status = SubmissionStatus::Submitting;
                state.last_gate_failure = None;
                tracing::info!(
                    tier = %state.draft.ticket_type,
                    email = %state.draft.email,
                    "Submitting registration"
                );

                smallvec![
                    Effect::Delay {
                        duration: env.submission_latency,
                        action: Box::new(RegistrationAction::SubmissionCompleted),
                    }
                    .cancellable(SUBMIT_EFFECT)
                ]
            },

            RegistrationAction::SubmissionCompleted => {
                if state.status != SubmissionStatus::Submitting {
                    // Stale completion, e.g. after a reset raced the delay
                    tracing::debug!(status = ?state.status, "Ignoring stale submission completion");
                    return smallvec![Effect::None];
                }

                state.status = SubmissionStatus::Submitted;
                tracing::info!(
                    at = %env.clock.now(),
                    attendee = %state.draft.full_name(),
                    "Registration submitted"
                );

                // Hand the completed draft to the confirmation collaborator.
                // The result is not observed.
                let sender = Arc::clone(&env.confirmations);
                let draft = state.draft.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    sender.send_confirmation(draft).await;
                    None
                }))]
            },

            RegistrationAction::ResetForm => {
                // Only exit from the terminal state
                if state.status == SubmissionStatus::Submitted {
                    state.reset();
                }
                smallvec![Effect::None]
            },
        }
    }
}

impl<C> RegistrationReducer<C> {
    /// Apply the `Advance` gate for the current step
    fn advance(state: &mut RegistrationState) {
        if state.status != SubmissionStatus::Editing {
            return;
        }
        match state.step {
            WizardStep::SelectTicket => {
                // A tier default is always selected; nothing gates step 0
                state.step = WizardStep::Information;
                state.last_gate_failure = None;
            },
            WizardStep::Information => match state.draft.validate_information() {
                Ok(()) => {
                    state.step = WizardStep::Confirmation;
                    state.last_gate_failure = None;
                },
                Err(gate) => {
                    tracing::debug!(%gate, "Advance gated on information step");
                    state.last_gate_failure = Some(gate);
                },
            },
            // Forward from confirmation is submission, not navigation
            WizardStep::Confirmation => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::RegistrationEnvironment;
    use crate::types::RegistrationDraft;
    use techconf_testing::mocks::FixedClock;
    use techconf_testing::{ReducerTest, assertions, test_clock};

    fn test_env() -> RegistrationEnvironment<FixedClock> {
        RegistrationEnvironment::new(test_clock())
    }

    fn reducer() -> RegistrationReducer<FixedClock> {
        RegistrationReducer::new()
    }

    fn state_at_confirmation() -> RegistrationState {
        RegistrationState {
            step: WizardStep::Confirmation,
            draft: RegistrationDraft {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                ticket_type: TicketTier::Premium,
                terms_accepted: true,
                ..RegistrationDraft::default()
            },
            ..RegistrationState::default()
        }
    }

    #[test]
    fn select_ticket_sets_tier_for_every_tier() {
        for tier in TicketTier::ALL {
            ReducerTest::new(reducer())
                .with_env(test_env())
                .given_state(RegistrationState::default())
                .when_action(RegistrationAction::SelectTicket(tier))
                .then_state(move |state| {
                    assert_eq!(state.draft.ticket_type, tier);
                    assert_eq!(state.draft.ticket_type.price(), tier.price());
                })
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn advance_from_ticket_step_always_succeeds() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::Advance)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::Information);
            })
            .run();
    }

    #[test]
    fn advance_from_information_gates_on_required_fields() {
        let cases = [
            ("", "Lovelace", "ada@example.com", DraftField::FirstName),
            ("Ada", "", "ada@example.com", DraftField::LastName),
            ("Ada", "Lovelace", "", DraftField::Email),
        ];

        for (first, last, email, missing) in cases {
            let state = RegistrationState {
                step: WizardStep::Information,
                draft: RegistrationDraft {
                    first_name: first.into(),
                    last_name: last.into(),
                    email: email.into(),
                    ..RegistrationDraft::default()
                },
                ..RegistrationState::default()
            };

            ReducerTest::new(reducer())
                .with_env(test_env())
                .given_state(state)
                .when_action(RegistrationAction::Advance)
                .then_state(move |state| {
                    assert_eq!(state.step, WizardStep::Information, "step must not change");
                    assert_eq!(
                        state.last_gate_failure,
                        Some(ValidationError::MissingRequiredField(missing))
                    );
                })
                .run();
        }
    }

    #[test]
    fn advance_from_information_ignores_company() {
        let state = RegistrationState {
            step: WizardStep::Information,
            draft: RegistrationDraft {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                company: String::new(),
                ..RegistrationDraft::default()
            },
            ..RegistrationState::default()
        };

        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state)
            .when_action(RegistrationAction::Advance)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::Confirmation);
                assert_eq!(state.last_gate_failure, None);
            })
            .run();
    }

    #[test]
    fn go_back_preserves_all_field_values() {
        let state = RegistrationState {
            step: WizardStep::Information,
            draft: RegistrationDraft {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                company: "Analytical Engines Ltd".into(),
                ticket_type: TicketTier::Vip,
                ..RegistrationDraft::default()
            },
            ..RegistrationState::default()
        };
        let expected_draft = state.draft.clone();

        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state)
            .when_action(RegistrationAction::GoBack)
            .when_action(RegistrationAction::Advance)
            .then_state(move |state| {
                assert_eq!(state.step, WizardStep::Information);
                assert_eq!(state.draft, expected_draft);
            })
            .run();
    }

    #[test]
    fn go_back_from_first_step_is_noop() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::GoBack)
            .then_state(|state| {
                assert_eq!(state.step, WizardStep::SelectTicket);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submit_schedules_cancellable_delay() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state_at_confirmation())
            .when_action(RegistrationAction::Submit)
            .then_state(|state| {
                assert_eq!(state.status, SubmissionStatus::Submitting);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancellable_effect(effects, SUBMIT_EFFECT);
            })
            .run();
    }

    #[test]
    fn submit_without_terms_is_noop_and_leaves_draft_unchanged() {
        let mut state = state_at_confirmation();
        state.draft.terms_accepted = false;
        let expected_draft = state.draft.clone();

        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state)
            .when_action(RegistrationAction::Submit)
            .then_state(move |state| {
                assert_eq!(state.status, SubmissionStatus::Editing);
                assert_eq!(state.draft, expected_draft);
                assert_eq!(
                    state.last_gate_failure,
                    Some(ValidationError::TermsNotAccepted)
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn reentrant_submit_while_submitting_is_noop() {
        let expected_draft = state_at_confirmation().draft;

        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state_at_confirmation())
            .when_action(RegistrationAction::Submit)
            .when_action(RegistrationAction::Submit)
            .then_state(move |state| {
                assert_eq!(state.status, SubmissionStatus::Submitting);
                assert_eq!(state.draft, expected_draft);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn submission_completed_hands_draft_to_confirmation_sender() {
        let mut state = state_at_confirmation();
        state.status = SubmissionStatus::Submitting;

        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(state)
            .when_action(RegistrationAction::SubmissionCompleted)
            .then_state(|state| {
                assert_eq!(state.status, SubmissionStatus::Submitted);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn stale_submission_completed_is_ignored() {
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::SubmissionCompleted)
            .then_state(|state| {
                assert_eq!(state.status, SubmissionStatus::Editing);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn reset_form_only_exits_terminal_state() {
        // Not submitted: reset is a no-op
        let mid_flow = RegistrationState {
            step: WizardStep::Information,
            ..RegistrationState::default()
        };
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(mid_flow.clone())
            .when_action(RegistrationAction::ResetForm)
            .then_state(move |state| {
                assert_eq!(*state, mid_flow);
            })
            .run();

        // Submitted: full reset to defaults
        let mut submitted = state_at_confirmation();
        submitted.status = SubmissionStatus::Submitted;
        ReducerTest::new(reducer())
            .with_env(test_env())
            .given_state(submitted)
            .when_action(RegistrationAction::ResetForm)
            .then_state(|state| {
                assert_eq!(*state, RegistrationState::default());
            })
            .run();
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn any_field() -> impl Strategy<Value = DraftField> {
            prop_oneof![
                Just(DraftField::FirstName),
                Just(DraftField::LastName),
                Just(DraftField::Email),
                Just(DraftField::Company),
            ]
        }

        fn any_step() -> impl Strategy<Value = WizardStep> {
            prop_oneof![
                Just(WizardStep::SelectTicket),
                Just(WizardStep::Information),
                Just(WizardStep::Confirmation),
            ]
        }

        proptest! {
            #[test]
            fn update_field_never_changes_step(
                field in any_field(),
                value in ".{0,40}",
                step in any_step(),
            ) {
                let mut state = RegistrationState {
                    step,
                    ..RegistrationState::default()
                };
                let effects = reducer().reduce(
                    &mut state,
                    RegistrationAction::UpdateField { field, value: value.clone() },
                    &test_env(),
                );

                prop_assert_eq!(state.step, step);
                prop_assert_eq!(state.draft.field(field), value.as_str());
                prop_assert!(matches!(effects.as_slice(), [Effect::None]));
            }

            #[test]
            fn advance_then_back_restores_step_and_draft(
                first in ".{1,20}",
                last in ".{1,20}",
                email in "[a-z]{1,10}@[a-z]{1,10}\\.com",
            ) {
                let mut state = RegistrationState {
                    step: WizardStep::Information,
                    draft: RegistrationDraft {
                        first_name: first,
                        last_name: last,
                        email,
                        ..RegistrationDraft::default()
                    },
                    ..RegistrationState::default()
                };
                let before = state.clone();

                let env = test_env();
                let r = reducer();
                r.reduce(&mut state, RegistrationAction::Advance, &env);
                prop_assert_eq!(state.step, WizardStep::Confirmation);
                r.reduce(&mut state, RegistrationAction::GoBack, &env);

                prop_assert_eq!(state.step, before.step);
                prop_assert_eq!(state.draft, before.draft);
            }
        }
    }
}
