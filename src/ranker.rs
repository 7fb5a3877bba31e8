//! Client-side result ranking.
//!
//! The search API assigns each result a coarse relevance score, but the
//! order it returns within a score band is arbitrary. Ranking groups
//! results by exact primary score and breaks ties with a link-graph
//! heuristic: incoming links from other domains count double the links
//! from the result's own domain, both log-dampened, plus an inverse bonus
//! for a good website popularity rank.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use url::Url;

use crate::result::SearchResult;

/// Weight applied to log-dampened external incoming links.
const EXTERNAL_LINK_WEIGHT: f64 = 1000.0;
/// Weight applied to log-dampened internal incoming links.
const INTERNAL_LINK_WEIGHT: f64 = 500.0;
/// Scale of the inverse website-rank bonus.
const WEBSITE_RANK_WEIGHT: f64 = 1000.0;

/// Re-orders raw API results for display.
///
/// Results are grouped by exact primary score, groups are ordered by
/// descending score, and each group is sorted by descending
/// [`secondary_score`]. Sorting is stable, so results tied on both scores
/// keep their API order. Pure: deterministic for a fixed input, no result
/// is ever dropped or altered.
pub fn rank(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut groups: Vec<(f64, Vec<SearchResult>)> = Vec::new();
    let mut group_index: HashMap<u64, usize> = HashMap::new();

    for result in results {
        // Exact-equality grouping; the bit pattern is the group key.
        match group_index.entry(result.score.to_bits()) {
            Entry::Occupied(slot) => groups[*slot.get()].1.push(result),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push((result.score, vec![result]));
            }
        }
    }

    groups.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let total: usize = groups.iter().map(|(_, members)| members.len()).sum();
    let mut ranked = Vec::with_capacity(total);
    for (_, members) in &mut groups {
        let mut scored: Vec<(f64, SearchResult)> = members
            .drain(..)
            .map(|result| (secondary_score(&result), result))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        ranked.extend(scored.into_iter().map(|(_, result)| result));
    }
    ranked
}

/// Computes the link-graph tie-break score for a result.
///
/// `ln(external + 1) * 1000 + ln(internal + 1) * 500` plus
/// `1000 / (1 + ln(rank))`, where an absent or zero website rank counts
/// as rank 1.
pub fn secondary_score(result: &SearchResult) -> f64 {
    let links = result.links_from.as_deref().unwrap_or_default();
    let incoming = links.len();
    let external = links
        .iter()
        .filter(|l| !same_domain(&l.link, &result.url))
        .count();
    let internal = incoming - external;

    let link_score = ((external + 1) as f64).ln() * EXTERNAL_LINK_WEIGHT
        + ((internal + 1) as f64).ln() * INTERNAL_LINK_WEIGHT;

    let rank = result.top_website_rank.filter(|r| *r > 0).unwrap_or(1);
    let rank_factor = WEBSITE_RANK_WEIGHT / (1.0 + (rank as f64).ln());

    link_score + rank_factor
}

/// Whether two URLs share a hostname, by case-sensitive exact match.
///
/// A URL that fails to parse, or has no host, counts as a different
/// domain; ranking must keep going on malformed link data.
fn same_domain(link: &str, url: &str) -> bool {
    match (Url::parse(link), Url::parse(url)) {
        (Ok(a), Ok(b)) => match (a.host_str(), b.host_str()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}
