//! Ticket catalog for the selection step.
//!
//! The wizard consumes the catalog as an injected read-only data source so
//! its logic is testable independent of the marketing content. Prices
//! derive from [`TicketTier::price`], keeping the selection and
//! confirmation steps on a single source of truth.

use crate::types::TicketTier;
use serde::{Deserialize, Serialize};

/// One ticket option as rendered on the selection step
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketOption {
    /// The tier this option sells
    pub tier: TicketTier,
    /// Display title
    pub title: String,
    /// Price in whole display-currency units
    pub price: u32,
    /// Short marketing description
    pub description: String,
    /// Bullet-point feature list
    pub features: Vec<String>,
}

/// Read-only source of ticket options
///
/// A single accessor keeps the wizard decoupled from where the content
/// actually lives.
pub trait TicketCatalog: Send + Sync {
    /// All ticket options, in display order
    fn list(&self) -> &[TicketOption];

    /// Look up the option for a tier
    fn option_for(&self, tier: TicketTier) -> Option<&TicketOption> {
        self.list().iter().find(|option| option.tier == tier)
    }
}

/// The TechConf 2025 ticket catalog
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    options: Vec<TicketOption>,
}

impl StaticCatalog {
    /// Build the catalog with the three TechConf 2025 tiers
    #[must_use]
    pub fn techconf_2025() -> Self {
        let options = vec![
            TicketOption {
                tier: TicketTier::Standard,
                title: TicketTier::Standard.title().to_string(),
                price: TicketTier::Standard.price(),
                description: "Perfect for individuals".to_string(),
                features: vec![
                    "Access to all talks".to_string(),
                    "Basic workshops".to_string(),
                    "Lunch and refreshments".to_string(),
                    "Conference materials".to_string(),
                    "Wifi access".to_string(),
                ],
            },
            TicketOption {
                tier: TicketTier::Premium,
                title: TicketTier::Premium.title().to_string(),
                price: TicketTier::Premium.price(),
                description: "For serious professionals".to_string(),
                features: vec![
                    "All Standard benefits".to_string(),
                    "Exclusive workshops".to_string(),
                    "Networking event".to_string(),
                    "Digital access to presentations".to_string(),
                    "1-year newsletter subscription".to_string(),
                ],
            },
            TicketOption {
                tier: TicketTier::Vip,
                title: TicketTier::Vip.title().to_string(),
                price: TicketTier::Vip.price(),
                description: "Ultimate conference experience".to_string(),
                features: vec![
                    "All Premium benefits".to_string(),
                    "VIP lounge access".to_string(),
                    "Speaker dinner invitation".to_string(),
                    "Front-row seating".to_string(),
                    "Exclusive swag package".to_string(),
                    "Hotel discount".to_string(),
                ],
            },
        ];

        Self { options }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::techconf_2025()
    }
}

impl TicketCatalog for StaticCatalog {
    fn list(&self) -> &[TicketOption] {
        &self.options
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_all_tiers_in_order() {
        let catalog = StaticCatalog::techconf_2025();
        let tiers: Vec<_> = catalog.list().iter().map(|o| o.tier).collect();
        assert_eq!(tiers, TicketTier::ALL);
    }

    #[test]
    fn catalog_prices_match_tier_prices() {
        let catalog = StaticCatalog::techconf_2025();
        for option in catalog.list() {
            assert_eq!(option.price, option.tier.price());
            assert_eq!(option.title, option.tier.title());
        }
    }

    #[test]
    fn option_lookup_by_tier() {
        let catalog = StaticCatalog::techconf_2025();
        let vip = catalog.option_for(TicketTier::Vip).unwrap();
        assert_eq!(vip.price, 1299);
        assert!(!vip.features.is_empty());
    }
}
