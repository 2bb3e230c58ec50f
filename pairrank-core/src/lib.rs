/// pairrank-core: Pure-computation pairwise ranking engine.
///
/// Repeated "which one?" votes → weighted rank centrality → a total order,
/// with user locks and manual reordering layered on top.
/// No IO, no persistence, no UI. Bring your own front end.
///
/// Items are identified by caller-provided string IDs and carry display
/// metadata the engine never looks at.
///
/// # Quick start
///
/// ```rust
/// use pairrank_core::{Item, RankingSession};
///
/// let items = vec![
///     Item::new("1", "Blinding Lights").with_artist("The Weeknd"),
///     Item::new("2", "Levitating").with_artist("Dua Lipa"),
///     Item::new("3", "Watermelon Sugar").with_artist("Harry Styles"),
/// ];
///
/// let mut session = RankingSession::with_seed(items, 42).unwrap();
///
/// while let Some((a, b)) = session.current_pair() {
///     // Your UI asks the user; here the lower ID always wins.
///     let (winner, loser) = if a.id < b.id { (a.id.clone(), b.id.clone()) } else { (b.id.clone(), a.id.clone()) };
///     session.record_vote(&winner, &loser).unwrap();
/// }
///
/// assert_eq!(session.progress().fraction, 1.0);
/// assert_eq!(session.ranking_list()[0].item.id, "1");
///
/// for (i, r) in session.ranking_list().iter().enumerate() {
///     println!("{}. {} ({:.4})", i + 1, r.item.name, r.score);
/// }
/// ```

pub mod constants;
pub mod display;
pub mod engine;
pub mod error;
pub mod matchups;
pub mod pairing;
pub mod rank_centrality;
pub mod scoring;
pub mod types;

// Re-export primary public API at crate root.
pub use display::{compose, DisplayState, LockMap};
pub use engine::{RankingSession, SessionState};
pub use error::{InvalidVote, RankError, Result};
pub use matchups::MatchupLog;
pub use pairing::{all_pairs, next_pair, next_pair_with, progress, PlayedSet};
pub use scoring::run_scoring;
pub use types::{Item, ItemId, Matchup, Progress, RankingItem, ScoringOptions, UnorderedPair};
