//! Mines the brew history for recurring habits.

use crate::stats::{weighted_mean, MIN_GOOD_RATING};
use cuppa_core::{BrewPattern, BrewRecord, PatternCategory};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

/// Good brews needed before a grind or ratio habit is reported.
const MIN_GROUP_SUPPORT: usize = 3;

/// Brews needed before a favorite method or origin is reported.
const MIN_FAVORITE_SUPPORT: usize = 5;

/// Finds grind, ratio, method and origin habits.
///
/// Output depends only on the input: groups are visited in key order and
/// ties between equally frequent methods or origins go to the
/// alphabetically first name.
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    /// Create a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Analyze a history snapshot.
    pub fn analyze_patterns(&self, history: &[BrewRecord]) -> Vec<BrewPattern> {
        let good: Vec<&BrewRecord> = history
            .iter()
            .filter(|r| r.rating >= MIN_GOOD_RATING)
            .collect();

        let mut patterns = Vec::new();
        patterns.extend(grind_preferences(&good));
        patterns.extend(optimal_ratios(&good));
        patterns.extend(favorite_method(history));
        patterns.extend(origin_trend(history));

        patterns.sort_by(|a, b| {
            (a.category.rank(), Reverse(a.support), &a.title)
                .cmp(&(b.category.rank(), Reverse(b.support), &b.title))
        });

        debug!(
            "Found {} patterns in {} brews ({} rated {}+)",
            patterns.len(),
            history.len(),
            good.len(),
            MIN_GOOD_RATING
        );
        patterns
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Group by a string key, dropping empty keys.
fn group_by<'a, I, F>(records: I, key: F) -> BTreeMap<&'a str, Vec<&'a BrewRecord>>
where
    I: IntoIterator<Item = &'a BrewRecord>,
    F: Fn(&'a BrewRecord) -> &'a str,
{
    let mut groups: BTreeMap<&'a str, Vec<&'a BrewRecord>> = BTreeMap::new();
    for record in records {
        let k = key(record);
        if !k.is_empty() {
            groups.entry(k).or_default().push(record);
        }
    }
    groups
}

fn grind_preferences(good: &[&BrewRecord]) -> Vec<BrewPattern> {
    let mut patterns = Vec::new();

    for (origin, brews) in group_by(good.iter().copied(), |r| r.bean_origin.as_str()) {
        let with_grind: Vec<&BrewRecord> = brews
            .into_iter()
            .filter(|r| r.grinder_setting > 0.0)
            .collect();
        if with_grind.len() < MIN_GROUP_SUPPORT {
            continue;
        }

        let Some(mean) = weighted_mean(with_grind.iter().copied(), |r| r.grinder_setting) else {
            continue;
        };
        if mean <= 0.0 {
            continue;
        }

        patterns.push(BrewPattern::new(
            format!("Grind for {}", origin),
            format!("Your best {} brews use grind setting ~{}", origin, mean.round() as i64),
            PatternCategory::GrindPreference,
            with_grind.len(),
        ));
    }

    patterns
}

fn optimal_ratios(good: &[&BrewRecord]) -> Vec<BrewPattern> {
    let mut patterns = Vec::new();

    for (method, brews) in group_by(good.iter().copied(), |r| r.method_name.as_str()) {
        let ratios: Vec<f64> = brews.iter().filter_map(|r| r.brew_ratio()).collect();
        if ratios.len() < MIN_GROUP_SUPPORT {
            continue;
        }

        let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
        patterns.push(BrewPattern::new(
            format!("Best {} Ratio", method),
            format!("Your top-rated {} brews use 1:{:.1}", method, mean),
            PatternCategory::RatioOptimal,
            ratios.len(),
        ));
    }

    patterns
}

/// Most frequent non-empty key with its count. Ties go to the first key.
fn most_frequent<'a>(groups: BTreeMap<&'a str, Vec<&'a BrewRecord>>) -> Option<(&'a str, usize)> {
    groups
        .into_iter()
        .map(|(k, v)| (k, v.len()))
        .fold(None, |best, (k, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((k, n)),
        })
}

fn favorite_method(history: &[BrewRecord]) -> Option<BrewPattern> {
    let (method, count) = most_frequent(group_by(history, |r| r.method_name.as_str()))?;
    (count >= MIN_FAVORITE_SUPPORT).then(|| {
        BrewPattern::new(
            "Favorite Method",
            format!("{} is your most-used brewing method with {} brews", method, count),
            PatternCategory::MethodFavorite,
            count,
        )
    })
}

fn origin_trend(history: &[BrewRecord]) -> Option<BrewPattern> {
    let (origin, count) = most_frequent(group_by(history, |r| r.bean_origin.as_str()))?;
    (count >= MIN_FAVORITE_SUPPORT).then(|| {
        BrewPattern::new(
            "Origin Trend",
            format!("You've brewed {} coffee {} times, your most explored origin", origin, count),
            PatternCategory::OriginTrend,
            count,
        )
    })
}
