//! Read-only views of journal entries and the bean/method identities they link to.

use crate::{BeanId, MethodId, Time};
use serde::{Deserialize, Serialize};

/// Category of a brewing method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCategory {
    /// Pressure brewing; ratio is yield over dose
    Espresso,
    /// Percolation; ratio is water over dose
    PourOver,
    /// Steeping
    Immersion,
    /// Anything else
    #[default]
    Other,
}

impl MethodCategory {
    /// Parse a persisted raw value. Unknown values map to `Other`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "espresso" => Self::Espresso,
            "pour_over" | "pourover" | "pour-over" => Self::PourOver,
            "immersion" => Self::Immersion,
            _ => Self::Other,
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Espresso => "Espresso",
            Self::PourOver => "Pour Over",
            Self::Immersion => "Immersion",
            Self::Other => "Other",
        }
    }
}

/// Identity of a coffee bean, as needed by the suggestion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeBean {
    /// Bean ID
    pub id: BeanId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Country or region of origin, free text. Empty if unknown.
    #[serde(default)]
    pub origin: String,
}

impl CoffeeBean {
    /// Create a bean identity.
    pub fn new(id: BeanId, origin: impl Into<String>) -> Self {
        Self {
            id,
            name: String::new(),
            origin: origin.into(),
        }
    }
}

/// Identity of a brew method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewMethod {
    /// Method ID
    pub id: MethodId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Method category
    #[serde(default)]
    pub category: MethodCategory,
}

impl BrewMethod {
    /// Create a method identity.
    pub fn new(id: MethodId, name: impl Into<String>, category: MethodCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

/// A read-only projection of one journal entry.
///
/// Missing relationships are explicit: a brew with no linked bean has
/// `bean_id == None` and an empty `bean_origin`; a brew with no linked
/// method has `method_id == None`, an empty `method_name` and the `Other`
/// category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrewRecord {
    /// Dry coffee mass (g)
    pub dose: f64,
    /// Water used (g)
    pub water_amount: f64,
    /// Beverage yield (g)
    pub yield_amount: f64,
    /// Water temperature
    pub water_temperature: f64,
    /// Grinder setting, 0 if not recorded
    pub grinder_setting: f64,
    /// Brew time in seconds
    pub brew_time: f64,
    /// Rating 0..=5, 0 means unrated
    pub rating: u8,
    /// Free-text notes
    pub notes: String,
    /// When the brew was logged
    pub created_at: Time,
    /// Linked bean
    pub bean_id: Option<BeanId>,
    /// Origin of the linked bean
    pub bean_origin: String,
    /// Linked method
    pub method_id: Option<MethodId>,
    /// Name of the linked method
    pub method_name: String,
    /// Category of the linked method
    pub method_category: MethodCategory,
}

impl BrewRecord {
    /// Rating as an aggregation weight.
    pub fn weight(&self) -> f64 {
        f64::from(self.rating)
    }

    /// Brew ratio: yield/dose for espresso, water/dose otherwise.
    ///
    /// `None` when the dose or the relevant liquid amount is not recorded.
    pub fn brew_ratio(&self) -> Option<f64> {
        if self.dose <= 0.0 {
            return None;
        }
        let liquid = match self.method_category {
            MethodCategory::Espresso => self.yield_amount,
            _ => self.water_amount,
        };
        (liquid > 0.0).then(|| liquid / self.dose)
    }

    /// Ratio as `1:N.N`, or `--` when it cannot be computed.
    pub fn brew_ratio_formatted(&self) -> String {
        match self.brew_ratio() {
            Some(ratio) => format!("1:{:.1}", ratio),
            None => "--".to_string(),
        }
    }

    /// Brew time as `m:ss`.
    pub fn brew_time_formatted(&self) -> String {
        format_brew_time(self.brew_time)
    }
}

/// Format seconds as `m:ss`. Fractions are truncated.
pub fn format_brew_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: MethodCategory, dose: f64, water: f64, yield_amount: f64) -> BrewRecord {
        BrewRecord {
            dose,
            water_amount: water,
            yield_amount,
            method_category: category,
            ..Default::default()
        }
    }

    #[test]
    fn test_espresso_ratio_uses_yield() {
        let r = record(MethodCategory::Espresso, 18.0, 0.0, 36.0);
        assert_eq!(r.brew_ratio(), Some(2.0));
        assert_eq!(r.brew_ratio_formatted(), "1:2.0");
    }

    #[test]
    fn test_espresso_without_yield_has_no_ratio() {
        let r = record(MethodCategory::Espresso, 18.0, 250.0, 0.0);
        assert_eq!(r.brew_ratio(), None);
        assert_eq!(r.brew_ratio_formatted(), "--");
    }

    #[test]
    fn test_pour_over_ratio_uses_water() {
        let r = record(MethodCategory::PourOver, 15.0, 250.0, 220.0);
        let ratio = r.brew_ratio().unwrap();
        assert!((ratio - 16.666).abs() < 0.01);
        assert_eq!(r.brew_ratio_formatted(), "1:16.7");
    }

    #[test]
    fn test_zero_dose_has_no_ratio() {
        let r = record(MethodCategory::Immersion, 0.0, 250.0, 0.0);
        assert_eq!(r.brew_ratio(), None);
    }

    #[test]
    fn test_format_brew_time() {
        assert_eq!(format_brew_time(0.0), "0:00");
        assert_eq!(format_brew_time(28.9), "0:28");
        assert_eq!(format_brew_time(185.0), "3:05");
    }

    #[test]
    fn test_method_category_from_raw() {
        assert_eq!(MethodCategory::from_raw("pour_over"), MethodCategory::PourOver);
        assert_eq!(MethodCategory::from_raw("Espresso"), MethodCategory::Espresso);
        assert_eq!(MethodCategory::from_raw("siphon"), MethodCategory::Other);
    }

    #[test]
    fn test_record_deserializes_with_missing_relationships() {
        let r: BrewRecord = serde_json::from_str(r#"{"dose": 18, "rating": 4}"#).unwrap();
        assert_eq!(r.dose, 18.0);
        assert_eq!(r.bean_id, None);
        assert!(r.bean_origin.is_empty());
        assert_eq!(r.method_category, MethodCategory::Other);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&MethodCategory::PourOver).unwrap();
        assert_eq!(json, "\"pour_over\"");
    }
}
