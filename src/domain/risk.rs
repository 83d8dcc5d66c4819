use crate::utils::error::{GrowthError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskItem {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskCategory {
    pub key: &'static str,
    pub title: &'static str,
    pub items: &'static [RiskItem],
}

const BIOLOGICAL: &[RiskItem] = &[
    RiskItem {
        key: "prematurity",
        label: "Prematurity / low birth weight",
    },
    RiskItem {
        key: "chronic_illness",
        label: "Chronic illness (e.g., CHD, cystic fibrosis)",
    },
    RiskItem {
        key: "gi_issues",
        label: "Gastrointestinal issues (reflux, malabsorption)",
    },
    RiskItem {
        key: "feeding_difficulties",
        label: "Feeding difficulties / oromotor issues",
    },
    RiskItem {
        key: "medications",
        label: "Medications affecting appetite/growth",
    },
    RiskItem {
        key: "genetic",
        label: "Genetic/syndromic conditions",
    },
    RiskItem {
        key: "sleep_issues",
        label: "Significant sleep disturbance",
    },
];

const PSYCHOLOGICAL: &[RiskItem] = &[
    RiskItem {
        key: "parental_stress",
        label: "High caregiver stress or mental health concerns",
    },
    RiskItem {
        key: "attachment",
        label: "Attachment/interaction concerns at mealtime",
    },
    RiskItem {
        key: "developmental_delay",
        label: "Developmental delay impacting feeding",
    },
    RiskItem {
        key: "sensory",
        label: "Sensory sensitivities",
    },
];

const SOCIAL: &[RiskItem] = &[
    RiskItem {
        key: "food_security",
        label: "Food insecurity / limited access to healthy options",
    },
    RiskItem {
        key: "housing",
        label: "Housing instability / overcrowding",
    },
    RiskItem {
        key: "cultural",
        label: "Cultural feeding practices impacting intake",
    },
    RiskItem {
        key: "screen_meals",
        label: "Screen use during meals / distracted eating",
    },
    RiskItem {
        key: "caregiver_knowledge",
        label: "Caregiver nutrition knowledge / skills",
    },
    RiskItem {
        key: "community_support",
        label: "Limited community/family supports",
    },
];

static RISK_CATEGORIES: [RiskCategory; 3] = [
    RiskCategory {
        key: "bio",
        title: "Biological",
        items: BIOLOGICAL,
    },
    RiskCategory {
        key: "psycho",
        title: "Psychological",
        items: PSYCHOLOGICAL,
    },
    RiskCategory {
        key: "social",
        title: "Social/Environmental",
        items: SOCIAL,
    },
];

/// Bio-psycho-social risk factors, in display order.
pub fn risk_categories() -> &'static [RiskCategory] {
    &RISK_CATEGORIES
}

pub fn find_risk(key: &str) -> Option<&'static RiskItem> {
    RISK_CATEGORIES
        .iter()
        .flat_map(|category| category.items.iter())
        .find(|item| item.key == key)
}

/// Risk factors the caregiver has ticked, in the order they were ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskSelection {
    keys: Vec<&'static str>,
}

impl RiskSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for key in keys {
            selection.select(key.as_ref())?;
        }
        Ok(selection)
    }

    fn lookup(key: &str) -> Result<&'static RiskItem> {
        find_risk(key).ok_or_else(|| GrowthError::UnknownRiskFactor {
            key: key.to_string(),
        })
    }

    /// Adds the key if absent. Returns whether the selection changed.
    pub fn select(&mut self, key: &str) -> Result<bool> {
        let item = Self::lookup(key)?;
        if self.keys.contains(&item.key) {
            return Ok(false);
        }
        self.keys.push(item.key);
        Ok(true)
    }

    /// Flips a checkbox. Returns the new checked state.
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        let item = Self::lookup(key)?;
        if let Some(pos) = self.keys.iter().position(|k| *k == item.key) {
            self.keys.remove(pos);
            Ok(false)
        } else {
            self.keys.push(item.key);
            Ok(true)
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.keys.iter().any(|k| *k == key)
    }

    pub fn count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_keys_are_unique() {
        let keys: Vec<&str> = risk_categories()
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.key))
            .collect();
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(keys.len(), 17);
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn test_find_risk() {
        assert_eq!(
            find_risk("housing").map(|r| r.label),
            Some("Housing instability / overcrowding")
        );
        assert!(find_risk("smoking").is_none());
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = RiskSelection::new();
        assert!(selection.toggle("prematurity").unwrap());
        assert!(selection.toggle("housing").unwrap());
        assert_eq!(selection.keys(), &["prematurity", "housing"]);

        assert!(!selection.toggle("prematurity").unwrap());
        assert_eq!(selection.keys(), &["housing"]);
        assert!(!selection.is_selected("prematurity"));
        assert_eq!(selection.count(), 1);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut selection = RiskSelection::new();
        assert!(matches!(
            selection.toggle("smoking"),
            Err(GrowthError::UnknownRiskFactor { .. })
        ));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_from_keys_ignores_duplicates() {
        let selection = RiskSelection::from_keys(["sensory", "sensory", "genetic"]).unwrap();
        assert_eq!(selection.count(), 2);
    }
}
