//! Weighted min-max score fusion.
//!
//! Each leg's scores are normalized to [0, 1] independently, then combined
//! as `semantic_weight * semantic + keyword_weight * keyword`. A document
//! present in only one leg uses 0 for the missing component. Ties break by
//! first appearance, semantic leg before keyword.

use std::collections::HashMap;

/// Normalize scores to [0, 1] in place.
///
/// A leg whose scores are all equal maps to 1.0 for every member; min-max
/// over a single distinct value would otherwise divide by zero.
pub fn min_max_normalize(leg: &mut [(String, f64)]) {
    let Some(&(_, first)) = leg.first() else {
        return;
    };
    let (mut min, mut max) = (first, first);
    for &(_, score) in leg.iter() {
        min = min.min(score);
        max = max.max(score);
    }
    let range = max - min;
    for entry in leg.iter_mut() {
        entry.1 = if range > 0.0 {
            (entry.1 - min) / range
        } else {
            1.0
        };
    }
}

#[derive(Default)]
struct Components {
    semantic: f64,
    keyword: f64,
    /// First-appearance ordinal across both legs, for stable tie-breaks.
    ordinal: usize,
}

/// Fuse two normalized legs into one ranking, descending by fused score.
///
/// Inputs are consumed as given; callers normalize first. Duplicated ids
/// within a leg keep the better score.
pub fn fuse(
    semantic: &[(String, f64)],
    keyword: &[(String, f64)],
    semantic_weight: f64,
    keyword_weight: f64,
) -> Vec<(String, f64)> {
    let mut components: HashMap<&str, Components> = HashMap::new();
    let mut next_ordinal = 0usize;

    for (id, score) in semantic {
        let entry = components.entry(id).or_insert_with(|| {
            let ordinal = next_ordinal;
            next_ordinal += 1;
            Components {
                ordinal,
                ..Components::default()
            }
        });
        entry.semantic = entry.semantic.max(*score);
    }
    for (id, score) in keyword {
        let entry = components.entry(id).or_insert_with(|| {
            let ordinal = next_ordinal;
            next_ordinal += 1;
            Components {
                ordinal,
                ..Components::default()
            }
        });
        entry.keyword = entry.keyword.max(*score);
    }

    let mut fused: Vec<(String, f64, usize)> = components
        .into_iter()
        .map(|(id, c)| {
            (
                id.to_string(),
                semantic_weight * c.semantic + keyword_weight * c.keyword,
                c.ordinal,
            )
        })
        .collect();

    fused.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.2.cmp(&b.2))
    });

    fused.into_iter().map(|(id, score, _)| (id, score)).collect()
}
