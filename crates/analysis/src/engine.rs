//! Recommends brew parameters from past good brews.

use crate::stats::{weighted_mean, MIN_GOOD_RATING};
use cuppa_core::{BrewMethod, BrewRecord, BrewSuggestion, CoffeeBean, SuggestionConfidence};
use tracing::debug;

/// Computes rating-weighted parameter suggestions.
pub struct SuggestionEngine;

impl SuggestionEngine {
    /// Create a new suggestion engine.
    pub fn new() -> Self {
        Self
    }

    /// Suggest parameters for brewing `bean` with `method`.
    ///
    /// Uses good brews of the same bean with the same method; if there are
    /// none, good brews of any bean from the same origin with the same
    /// method. `None` when neither pool has a brew.
    pub fn suggest(
        &self,
        bean: &CoffeeBean,
        method: &BrewMethod,
        history: &[BrewRecord],
    ) -> Option<BrewSuggestion> {
        let good_with_method = |r: &&BrewRecord| {
            r.method_id == Some(method.id) && r.rating >= MIN_GOOD_RATING
        };

        let same_bean: Vec<&BrewRecord> = history
            .iter()
            .filter(good_with_method)
            .filter(|r| r.bean_id == Some(bean.id))
            .collect();

        let pool = if !same_bean.is_empty() {
            same_bean
        } else if !bean.origin.is_empty() {
            history
                .iter()
                .filter(good_with_method)
                .filter(|r| r.bean_origin == bean.origin)
                .collect()
        } else {
            Vec::new()
        };

        if pool.is_empty() {
            debug!("No good brews for bean {} with method {}", bean.id, method.id);
            return None;
        }

        let all = || pool.iter().copied();
        let positive = |value: fn(&BrewRecord) -> f64| {
            weighted_mean(all().filter(move |r| value(r) > 0.0), value)
        };

        let suggestion = BrewSuggestion {
            dose: weighted_mean(all(), |r| r.dose)?,
            water_amount: positive(|r| r.water_amount),
            yield_amount: positive(|r| r.yield_amount),
            water_temperature: weighted_mean(all(), |r| r.water_temperature)?,
            grinder_setting: positive(|r| r.grinder_setting),
            brew_time: weighted_mean(all(), |r| r.brew_time)?,
            confidence: SuggestionConfidence::from_count(pool.len()),
            based_on_count: pool.len(),
        };

        debug!(
            "Suggestion for bean {} based on {} brews ({:?})",
            bean.id, suggestion.based_on_count, suggestion.confidence
        );
        Some(suggestion)
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuppa_core::{BeanId, MethodCategory, MethodId};

    struct Fixture {
        bean: CoffeeBean,
        method: BrewMethod,
    }

    impl Fixture {
        fn new(origin: &str) -> Self {
            Self {
                bean: CoffeeBean::new(BeanId::new(), origin),
                method: BrewMethod::new(MethodId::new(), "V60", MethodCategory::PourOver),
            }
        }

        fn brew(&self, dose: f64, rating: u8) -> BrewRecord {
            BrewRecord {
                dose,
                water_temperature: 94.0,
                brew_time: 180.0,
                rating,
                bean_id: Some(self.bean.id),
                bean_origin: self.bean.origin.clone(),
                method_id: Some(self.method.id),
                method_name: self.method.name.clone(),
                method_category: self.method.category,
                ..Default::default()
            }
        }

        fn other_bean_brew(&self, dose: f64, rating: u8) -> BrewRecord {
            BrewRecord {
                bean_id: Some(BeanId::new()),
                ..self.brew(dose, rating)
            }
        }

        fn suggest(&self, history: &[BrewRecord]) -> Option<BrewSuggestion> {
            SuggestionEngine::new().suggest(&self.bean, &self.method, history)
        }
    }

    #[test]
    fn test_empty_history_has_no_suggestion() {
        let f = Fixture::new("Ethiopia");
        assert!(f.suggest(&[]).is_none());
    }

    #[test]
    fn test_weighted_dose() {
        let f = Fixture::new("Ethiopia");
        let history = vec![f.brew(10.0, 5), f.brew(20.0, 3), f.brew(20.0, 4)];
        // the rating 3 brew is not part of the pool
        let s = f.suggest(&history).unwrap();
        assert!((s.dose - (10.0 * 5.0 + 20.0 * 4.0) / 9.0).abs() < 1e-9);
        assert_eq!(s.based_on_count, 2);
    }

    #[test]
    fn test_weighted_mean_matches_worked_example() {
        let f = Fixture::new("Ethiopia");
        let history = vec![f.brew(10.0, 5), f.brew(20.0, 4)];
        let s = f.suggest(&history).unwrap();
        assert!((s.dose - 130.0 / 9.0).abs() < 1e-9);
        assert_eq!(s.water_temperature, 94.0);
        assert_eq!(s.brew_time, 180.0);
    }

    #[test]
    fn test_zero_valued_fields_are_inapplicable() {
        let f = Fixture::new("Ethiopia");
        let mut history = vec![f.brew(15.0, 5), f.brew(15.0, 4)];
        history[0].water_amount = 250.0;
        history[0].grinder_setting = 12.0;
        history[1].grinder_setting = 0.0;

        let s = f.suggest(&history).unwrap();
        assert_eq!(s.water_amount, Some(250.0));
        assert_eq!(s.grinder_setting, Some(12.0));
        assert_eq!(s.yield_amount, None);
    }

    #[test]
    fn test_zero_dose_still_counts() {
        let f = Fixture::new("Ethiopia");
        let history = vec![f.brew(0.0, 5), f.brew(18.0, 5)];
        let s = f.suggest(&history).unwrap();
        assert_eq!(s.dose, 9.0);
    }

    #[test]
    fn test_confidence_buckets() {
        let f = Fixture::new("Ethiopia");
        for (count, expected) in [
            (1, SuggestionConfidence::Low),
            (2, SuggestionConfidence::Medium),
            (4, SuggestionConfidence::Medium),
            (5, SuggestionConfidence::High),
            (6, SuggestionConfidence::High),
        ] {
            let history: Vec<_> = (0..count).map(|_| f.brew(18.0, 5)).collect();
            let s = f.suggest(&history).unwrap();
            assert_eq!(s.confidence, expected, "pool of {}", count);
            assert_eq!(s.based_on_count, count);
        }
    }

    #[test]
    fn test_origin_fallback_when_bean_has_no_good_brews() {
        let f = Fixture::new("Ethiopia");
        let history = vec![f.brew(18.0, 2), f.other_bean_brew(16.0, 5), f.other_bean_brew(16.0, 4)];
        let s = f.suggest(&history).unwrap();
        assert_eq!(s.dose, 16.0);
        assert_eq!(s.based_on_count, 2);
    }

    #[test]
    fn test_bean_pool_takes_priority_over_larger_origin_pool() {
        let f = Fixture::new("Ethiopia");
        let mut history: Vec<_> = (0..6).map(|_| f.other_bean_brew(16.0, 5)).collect();
        history.push(f.brew(20.0, 4));

        let s = f.suggest(&history).unwrap();
        assert_eq!(s.dose, 20.0);
        assert_eq!(s.based_on_count, 1);
        assert_eq!(s.confidence, SuggestionConfidence::Low);
    }

    #[test]
    fn test_no_origin_fallback_for_unknown_origin() {
        let f = Fixture::new("");
        let history = vec![f.other_bean_brew(16.0, 5)];
        assert!(f.suggest(&history).is_none());
    }

    #[test]
    fn test_other_methods_are_ignored() {
        let f = Fixture::new("Ethiopia");
        let mut brew = f.brew(18.0, 5);
        brew.method_id = Some(MethodId::new());
        let unlinked = BrewRecord {
            method_id: None,
            ..f.brew(18.0, 5)
        };
        assert!(f.suggest(&[brew, unlinked]).is_none());
    }

    #[test]
    fn test_suggestion_is_repeatable() {
        let f = Fixture::new("Ethiopia");
        let history = vec![f.brew(17.0, 5), f.brew(18.5, 4), f.brew(16.0, 4)];
        assert_eq!(f.suggest(&history), f.suggest(&history));
    }
}
