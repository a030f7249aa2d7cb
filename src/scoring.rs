use crate::gateway::RecipeGateway;
use crate::model::{Candidate, MatchResult};
use log::{debug, info};
use std::collections::BTreeSet;

/// Number of requested tokens found as a substring of any ingredient name.
///
/// `ingredient_names` are expected lower-cased; tokens from the extractor
/// already are.
pub fn score(requested: &BTreeSet<String>, ingredient_names: &[String]) -> usize {
    requested
        .iter()
        .filter(|token| ingredient_names.iter().any(|name| name.contains(token.as_str())))
        .count()
}

/// Pick the best of the first `limit` candidates.
///
/// Details are fetched one at a time in list order. Ties keep the earlier
/// candidate and the scan stops at the first perfect score. When none of the
/// scanned candidates could be fetched, the first candidate is looked up
/// once more as a last resort.
pub async fn select_best(
    gateway: &dyn RecipeGateway,
    candidates: &[Candidate],
    requested: &BTreeSet<String>,
    limit: usize,
) -> Option<MatchResult> {
    let mut best: Option<MatchResult> = None;

    for candidate in candidates.iter().take(limit) {
        let Some(detail) = gateway.fetch_details(&candidate.id).await else {
            debug!("Skipping candidate {} without details", candidate.id);
            continue;
        };

        let ingredient_names = detail.ingredient_names();
        let candidate_score = score(requested, &ingredient_names);
        debug!(
            "Candidate {} '{}' scored {}/{}",
            candidate.id,
            detail.name,
            candidate_score,
            requested.len()
        );

        if best.as_ref().map_or(true, |b| candidate_score > b.score) {
            best = Some(MatchResult {
                detail,
                ingredient_names,
                score: candidate_score,
            });
        }

        if best.as_ref().is_some_and(|b| b.score == requested.len()) {
            info!("Perfect match found, stopping scan");
            break;
        }
    }

    if best.is_some() {
        return best;
    }

    let first = candidates.first()?;
    debug!("No scanned candidate had details, retrying {}", first.id);
    let detail = gateway.fetch_details(&first.id).await?;
    let ingredient_names = detail.ingredient_names();
    let fallback_score = score(requested, &ingredient_names);
    Some(MatchResult {
        detail,
        ingredient_names,
        score: fallback_score,
    })
}
