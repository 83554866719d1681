use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::ir::Point;

/// Replaces each coordinate by its rank among the distinct values on its axis.
///
/// Equal values share a rank, so places on the same raw line stay on the same
/// grid line. Real distances are discarded entirely.
pub fn normalize_grid(places: &BTreeMap<String, Point>) -> BTreeMap<String, Point> {
    let xs = distinct_sorted(places.values().map(|p| p.x));
    let ys = distinct_sorted(places.values().map(|p| p.y));

    places
        .iter()
        .map(|(name, p)| (name.clone(), Point::new(rank_of(&xs, p.x), rank_of(&ys, p.y))))
        .collect()
}

fn distinct_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values.dedup();
    values
}

fn rank_of(sorted: &[f64], value: f64) -> f64 {
    let rank = sorted
        .binary_search_by(|probe| probe.partial_cmp(&value).unwrap_or(Ordering::Equal))
        .unwrap_or_else(|insert_at| insert_at);
    rank as f64
}
