use indexmap::IndexMap;
use std::hash::Hash;

/// Counts occurrences, remembering the order in which values first appear.
pub fn counts<T, I>(values: I) -> IndexMap<T, usize>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut out = IndexMap::new();
    for value in values {
        *out.entry(value).or_insert(0) += 1;
    }
    out
}

/// Most frequent value. On a tie the value seen first wins.
/// Returns `None` for empty input.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts(values) {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Distinct values with their counts, most frequent first. Ties keep
/// first-seen order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Hash + Eq,
    I: IntoIterator<Item = T>,
{
    let mut out: Vec<_> = counts(values).into_iter().collect();
    // stable
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
