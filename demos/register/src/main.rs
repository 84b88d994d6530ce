//! Scripted registration flow against the wizard store.
//!
//! Walks one attendee through all three steps, submits, prints the
//! confirmation summary, then resets for the next attendee.

use std::time::Duration;

use anyhow::Result;
use techconf_core::environment::SystemClock;
use techconf_registration::catalog::{StaticCatalog, TicketCatalog};
use techconf_registration::config::{Settings, Theme};
use techconf_registration::environment::RegistrationEnvironment;
use techconf_registration::reducer::{RegistrationAction, RegistrationReducer};
use techconf_registration::summary::ConfirmationSummary;
use techconf_registration::types::{DraftField, RegistrationState, TicketTier};
use techconf_runtime::Store;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::with_theme(Theme::Dark);
    tracing::info!(theme = ?settings.theme, "Starting registration demo");

    // The catalog is the read-only content the selection step renders
    let catalog = StaticCatalog::techconf_2025();
    println!("Available tickets:");
    for option in catalog.list() {
        println!(
            "  {:<8} ${:<5} {}",
            option.title, option.price, option.description
        );
    }
    println!();

    let env = RegistrationEnvironment::new(SystemClock)
        .with_submission_latency(Duration::from_millis(300));
    let store = Store::new(
        RegistrationState::default(),
        RegistrationReducer::new(),
        env,
    );

    // Step 0: pick a tier
    store
        .send(RegistrationAction::SelectTicket(TicketTier::Premium))
        .await?;
    store.send(RegistrationAction::Advance).await?;

    // Step 1: attendee information
    for (field, value) in [
        (DraftField::FirstName, "Ada"),
        (DraftField::LastName, "Lovelace"),
        (DraftField::Email, "ada@example.com"),
        (DraftField::Company, "Analytical Engines Ltd"),
    ] {
        store
            .send(RegistrationAction::UpdateField {
                field,
                value: value.to_string(),
            })
            .await?;
    }
    store.send(RegistrationAction::Advance).await?;

    // Step 2: accept terms and submit, waiting out the simulated round trip
    store.send(RegistrationAction::SetTermsAccepted(true)).await?;
    store
        .send_and_wait_for(
            RegistrationAction::Submit,
            |a| matches!(a, RegistrationAction::SubmissionCompleted),
            Duration::from_secs(5),
        )
        .await?;

    let summary = store
        .state(|s| ConfirmationSummary::from_draft(&s.draft))
        .await;
    println!("Registration successful!\n");
    println!("{summary}");
    println!();

    // Register another attendee: back to a fresh wizard
    let mut handle = store.send(RegistrationAction::ResetForm).await?;
    handle.wait().await;
    tracing::info!("Wizard reset for the next attendee");

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
