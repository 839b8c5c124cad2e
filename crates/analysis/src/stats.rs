//! Rating-weighted aggregation.

use cuppa_core::BrewRecord;

/// Brews rated at or above this count as good.
pub const MIN_GOOD_RATING: u8 = 4;

/// Rating-weighted mean of `value`: `Σ(value·rating) / Σ(rating)`.
///
/// `None` when there are no records or every rating is 0.
pub fn weighted_mean<'a, I, F>(records: I, value: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a BrewRecord>,
    F: Fn(&BrewRecord) -> f64,
{
    let (sum, total_weight) = records
        .into_iter()
        .fold((0.0, 0.0), |(sum, weight), r| {
            (sum + value(r) * r.weight(), weight + r.weight())
        });

    (total_weight > 0.0).then(|| sum / total_weight)
}
