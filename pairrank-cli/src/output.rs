/// Output formatting: the pair prompt, terminal table and JSON.
use pairrank_core::{Item, Progress, RankingItem, RankingSession};
use serde::Serialize;

use crate::bail;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    artist: Option<String>,
    score: f64,
    locked: bool,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    comparisons: usize,
    completed_pairs: usize,
    total_pairs: usize,
    complete: bool,
}

fn label(item: &Item) -> String {
    match &item.artist {
        Some(artist) => format!("{} by {}", item.name, artist),
        None => item.name.clone(),
    }
}

/// Render the ranking as a fixed-width table.
pub fn render_table(rankings: &[RankingItem], is_locked: impl Fn(&str) -> bool) -> String {
    let name_width = rankings.iter()
        .map(|r| r.item.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Song"
    let artist_width = rankings.iter()
        .map(|r| r.item.artist.as_deref().map_or(0, |a| a.chars().count()))
        .max()
        .unwrap_or(6)
        .max(6); // at least "Artist"

    let mut out = String::new();
    out.push_str(&format!(
        " # | {:<name_width$} | {:<artist_width$} |  Score | Lock\n",
        "Song", "Artist",
    ));
    out.push_str(&format!(
        "---|-{}-|-{}-|--------|-----\n",
        "-".repeat(name_width),
        "-".repeat(artist_width),
    ));

    for (i, r) in rankings.iter().enumerate() {
        let lock = if is_locked(&r.item.id) { "  *" } else { "" };
        out.push_str(&format!(
            "{:>2} | {:<name_width$} | {:<artist_width$} | {:>6.4} | {}\n",
            i + 1,
            r.item.name,
            r.item.artist.as_deref().unwrap_or(""),
            r.score,
            lock,
        ));
    }
    out
}

fn progress_line(progress: &Progress) -> String {
    format!(
        "{} of {} pairs compared ({:.0}%), {} remaining",
        progress.completed,
        progress.total,
        progress.fraction * 100.0,
        progress.remaining,
    )
}

/// Print the pair awaiting a vote.
pub fn print_pair(first: &Item, second: &Item, progress: &Progress) {
    println!("\n[{}]", progress_line(progress));
    println!("  1) {}", label(first));
    println!("  2) {}", label(second));
}

/// Print the current ranking as a terminal table.
pub fn print_table(session: &RankingSession) {
    print!("{}", render_table(session.ranking_list(), |id| session.is_locked(id)));
    println!("\n{} ({} votes)", progress_line(&session.progress()), session.matchups().len());
}

pub fn render_json(session: &RankingSession) -> serde_json::Result<String> {
    let items: Vec<JsonRankedItem> = session
        .ranking_list()
        .iter()
        .enumerate()
        .map(|(i, r)| JsonRankedItem {
            rank: i + 1,
            id: r.item.id.clone(),
            name: r.item.name.clone(),
            artist: r.item.artist.clone(),
            score: r.score,
            locked: session.is_locked(&r.item.id),
        })
        .collect();

    let progress = session.progress();
    let output = JsonOutput {
        items,
        comparisons: session.matchups().len(),
        completed_pairs: progress.completed,
        total_pairs: progress.total,
        complete: session.is_complete(),
    };

    serde_json::to_string_pretty(&output)
}

/// Print the current ranking as JSON.
pub fn print_json(session: &RankingSession) {
    match render_json(session) {
        Ok(json) => println!("{json}"),
        Err(e) => bail(format!("Failed to serialize ranking: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> RankingSession {
        let items = vec![
            Item::new("1", "Levitating").with_artist("Dua Lipa"),
            Item::new("2", "Stay"),
        ];
        RankingSession::with_seed(items, 1).unwrap()
    }

    #[test]
    fn test_render_table_marks_locked_rows() {
        let mut session = make_session();
        session.record_vote("2", "1").unwrap();
        session.toggle_lock("2");

        let table = render_table(session.ranking_list(), |id| session.is_locked(id));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Song") && lines[0].contains("Artist"));
        assert!(lines[2].starts_with(" 1 | Stay"));
        assert!(lines[2].ends_with('*'));
        assert!(lines[3].contains("Dua Lipa"));
        assert!(!lines[3].ends_with('*'));
    }

    #[test]
    fn test_render_json() {
        let mut session = make_session();
        session.record_vote("1", "2").unwrap();

        let json: serde_json::Value = serde_json::from_str(&render_json(&session).unwrap()).unwrap();
        assert_eq!(json["items"][0]["name"], "Levitating");
        assert_eq!(json["items"][0]["rank"], 1);
        assert_eq!(json["items"][0]["artist"], "Dua Lipa");
        assert!(json["items"][1].get("artist").is_none());
        assert_eq!(json["comparisons"], 1);
        assert_eq!(json["complete"], true);
    }

    #[test]
    fn test_progress_line() {
        let progress = Progress { completed: 3, total: 12, remaining: 9, fraction: 0.25 };
        assert_eq!(progress_line(&progress), "3 of 12 pairs compared (25%), 9 remaining");
    }
}
