//! Fuzzy "did you mean" suggestions for ids that fail to resolve.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Return the best fuzzy match for `query` among `candidates`.
///
/// Matching runs in both directions so that typos ("basic-movment") and
/// truncations ("fundamental") both find their target. Ties keep the
/// earliest candidate.
pub fn closest<'a, I>(query: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    let mut best: Option<(i64, &str)> = None;

    for candidate in candidates {
        let score = matcher
            .fuzzy_match(candidate, query)
            .or_else(|| matcher.fuzzy_match(query, candidate));

        if let Some(score) = score {
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, candidate));
            }
        }
    }

    best.map(|(_, candidate)| candidate.to_string())
}
