/// Rank-centrality scoring wrapper.
///
/// One function, one options struct. Pure function: no IO, no state.
/// Every call recomputes from the full matchup log.
use std::cmp::Ordering;

use crate::error::Result;
use crate::rank_centrality::RankCentrality;
use crate::types::{IdMap, Item, Matchup, RankingItem, ScoringOptions};

/// Score every item from the matchup log and return the base ranking,
/// sorted by score descending (ties keep item order).
///
/// Always returns one entry per item. Fails only if a matchup names an
/// unknown item or pits an item against itself, or if item IDs repeat.
pub fn run_scoring(
    items: &[Item],
    matchups: &[Matchup],
    options: &ScoringOptions,
) -> Result<Vec<RankingItem>> {
    let id_map = IdMap::from_items(items)?;
    let indexed = id_map.convert_matchups(matchups)?;

    let mut rc = RankCentrality::new(id_map.len(), &indexed, options.damping);
    rc.calculate_scores(options.iterations);

    let mut rankings: Vec<RankingItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| RankingItem {
            item: item.clone(),
            score: rc.get_score(i),
        })
        .collect();

    rankings.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(rankings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidVote, RankError};

    fn make_items(ids: &[&str]) -> Vec<Item> {
        ids.iter().map(|id| Item::new(*id, id.to_uppercase())).collect()
    }

    fn make_log(votes: &[(&str, &str)]) -> Vec<Matchup> {
        votes
            .iter()
            .enumerate()
            .map(|(i, (winner, loser))| Matchup {
                winner: winner.to_string(),
                loser: loser.to_string(),
                sequence_index: i,
            })
            .collect()
    }

    fn order(rankings: &[RankingItem]) -> Vec<&str> {
        rankings.iter().map(|r| r.item.id.as_str()).collect()
    }

    #[test]
    fn test_no_matchups_keeps_item_order_and_uniform_scores() {
        let items = make_items(&["a", "b", "c", "d"]);
        let rankings = run_scoring(&items, &[], &ScoringOptions::default()).unwrap();

        assert_eq!(order(&rankings), vec!["a", "b", "c", "d"]);
        for r in &rankings {
            assert!((r.score - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transitive_votes() {
        let items = make_items(&["a", "b", "c"]);
        let log = make_log(&[("a", "b"), ("b", "c"), ("a", "c")]);
        let rankings = run_scoring(&items, &log, &ScoringOptions::default()).unwrap();

        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0].item.id, "a");
        assert_eq!(rankings[2].item.id, "c");
    }

    #[test]
    fn test_transitive_votes_any_order_and_damping() {
        let items = make_items(&["c", "a", "b"]);
        let log = make_log(&[("a", "c"), ("b", "c"), ("a", "b")]);
        for damping in [0.5, 0.85, 0.99] {
            let options = ScoringOptions { iterations: 100, damping };
            let rankings = run_scoring(&items, &log, &options).unwrap();
            assert_eq!(rankings[0].item.id, "a", "damping {damping}");
            assert_eq!(rankings[2].item.id, "c", "damping {damping}");
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let items = make_items(&["a", "b", "c", "d", "e"]);
        let log = make_log(&[("e", "a"), ("b", "c"), ("c", "d"), ("a", "b"), ("d", "e"), ("b", "e")]);
        let rankings = run_scoring(&items, &log, &ScoringOptions::default()).unwrap();

        let total: f64 = rankings.iter().map(|r| r.score).sum();
        assert!((total - 1.0).abs() < 1e-6, "scores sum to {total}");
    }

    #[test]
    fn test_earlier_votes_weigh_more() {
        // c loses to both a and b; whoever beat it first gets the larger share.
        let items = make_items(&["a", "b", "c"]);
        let log = make_log(&[("a", "c"), ("b", "c")]);
        let rankings = run_scoring(&items, &log, &ScoringOptions::default()).unwrap();
        assert_eq!(order(&rankings), vec!["a", "b", "c"]);

        let log = make_log(&[("b", "c"), ("a", "c")]);
        let rankings = run_scoring(&items, &log, &ScoringOptions::default()).unwrap();
        assert_eq!(order(&rankings), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_metadata_passes_through() {
        let items = vec![Item::new("1", "Blinding Lights").with_artist("The Weeknd")];
        let rankings = run_scoring(&items, &[], &ScoringOptions::default()).unwrap();
        assert_eq!(rankings[0].item.artist.as_deref(), Some("The Weeknd"));
        assert!((rankings[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_items() {
        let rankings = run_scoring(&[], &[], &ScoringOptions::default()).unwrap();
        assert!(rankings.is_empty());
    }

    #[test]
    fn test_unknown_item_rejected() {
        let items = make_items(&["a", "b"]);
        let log = make_log(&[("a", "z")]);
        let err = run_scoring(&items, &log, &ScoringOptions::default()).unwrap_err();
        assert_eq!(err, RankError::InvalidVote(InvalidVote::UnknownItem("z".to_string())));
    }
}
