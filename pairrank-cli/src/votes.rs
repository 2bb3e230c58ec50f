/// Vote snapshots as JSON Lines, one matchup per line.
///
/// A snapshot always holds a session's whole log from index 0, so replaying
/// it restores the session. Accepted votes are appended as they happen.
use pairrank_core::{ItemId, Matchup};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::Path;

/// Append one vote and flush.
pub fn write_vote(writer: &mut impl Write, matchup: &Matchup) -> io::Result<()> {
    write_votes(writer, std::slice::from_ref(matchup))
}

/// Append every matchup in order, then flush.
pub fn write_votes(writer: &mut impl Write, matchups: &[Matchup]) -> io::Result<()> {
    for matchup in matchups {
        let line = serde_json::to_string(matchup).map_err(io::Error::other)?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

/// Read `(winner, loser)` pairs in file order. Blank lines are skipped.
/// Stored sequence indices are ignored; order in the file is what counts.
pub fn read_votes(reader: impl BufRead) -> Result<Vec<(ItemId, ItemId)>, String> {
    let mut votes = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("line {}: {e}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let matchup: Matchup = serde_json::from_str(&line)
            .map_err(|e| format!("line {}: {e}", i + 1))?;
        votes.push((matchup.winner, matchup.loser));
    }
    Ok(votes)
}

fn holds_votes(path: &Path) -> io::Result<bool> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.lines().any(|line| !line.trim().is_empty())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Open the snapshot at `path` for a session whose log so far is `log`.
///
/// The snapshot the session was resumed from already holds `log` and is
/// appended to. Any other target must be missing or empty; `log` is written
/// to it in full first. A target holding another session's votes is refused.
pub fn open_snapshot(path: &Path, resumed_from: Option<&Path>, log: &[Matchup]) -> Result<File, String> {
    if resumed_from.is_some_and(|source| same_file(source, path)) {
        return OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open {}: {e}", path.display()));
    }

    let occupied = holds_votes(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    if occupied {
        return Err(format!(
            "{} already holds votes from another session; continue it with --resume or pick a new file",
            path.display()
        ));
    }

    let mut file = File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    write_votes(&mut file, log).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairrank_core::{Item, SessionState};
    use std::io::{BufReader, Cursor};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pairrank-votes-{}-{name}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    fn make_items() -> Vec<Item> {
        vec![Item::new("1", "A"), Item::new("2", "B"), Item::new("3", "C")]
    }

    fn read_file(path: &Path) -> Vec<(ItemId, ItemId)> {
        read_votes(BufReader::new(File::open(path).unwrap())).unwrap()
    }

    #[test]
    fn test_written_votes_read_back_in_order() {
        let mut buffer = Vec::new();
        for (i, (winner, loser)) in [("3", "1"), ("1", "2")].into_iter().enumerate() {
            let matchup = Matchup {
                winner: winner.to_string(),
                loser: loser.to_string(),
                sequence_index: i,
            };
            write_vote(&mut buffer, &matchup).unwrap();
        }

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(r#"{"winner":"3","loser":"1","sequence_index":0}"#));

        let votes = read_votes(Cursor::new(buffer)).unwrap();
        assert_eq!(
            votes,
            vec![
                ("3".to_string(), "1".to_string()),
                ("1".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_votes_skips_blank_lines_and_missing_index() {
        let input = "\n{\"winner\":\"a\",\"loser\":\"b\"}\n\n";
        let votes = read_votes(Cursor::new(input)).unwrap();
        assert_eq!(votes, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn test_read_votes_reports_bad_line() {
        let input = "{\"winner\":\"a\",\"loser\":\"b\"}\nnot json\n";
        let err = read_votes(Cursor::new(input)).unwrap_err();
        assert!(err.starts_with("line 2:"), "unexpected error: {err}");
    }

    #[test]
    fn test_resumed_session_saved_elsewhere_keeps_full_log() {
        let first = temp_path("resume-src");
        let second = temp_path("resume-dst");

        // First run: two votes into `first`.
        let mut state = SessionState::new(make_items()).unwrap();
        let mut file = open_snapshot(&first, None, state.matchups()).unwrap();
        for (winner, loser) in [("1", "3"), ("2", "3")] {
            state = state.apply_vote(winner, loser).unwrap();
            write_vote(&mut file, state.matchups().last().unwrap()).unwrap();
        }
        drop(file);

        // Second run: resume from `first`, save to `second`, one more vote.
        let mut resumed = SessionState::replay(make_items(), &read_file(&first)).unwrap();
        let mut file = open_snapshot(&second, Some(&first), resumed.matchups()).unwrap();
        resumed = resumed.apply_vote("1", "2").unwrap();
        write_vote(&mut file, resumed.matchups().last().unwrap()).unwrap();
        drop(file);

        let restored = SessionState::replay(make_items(), &read_file(&second)).unwrap();
        assert_eq!(restored.matchups(), resumed.matchups());
        assert_eq!(restored.progress().completed, 3);
        assert_eq!(read_file(&first).len(), 2);

        let _ = std::fs::remove_file(&first);
        let _ = std::fs::remove_file(&second);
    }

    #[test]
    fn test_resuming_in_place_appends() {
        let path = temp_path("in-place");
        let mut state = SessionState::new(make_items()).unwrap();
        state = state.apply_vote("3", "1").unwrap();
        std::fs::write(&path, "").unwrap();
        let mut file = open_snapshot(&path, None, state.matchups()).unwrap();
        drop(file);

        let mut resumed = SessionState::replay(make_items(), &read_file(&path)).unwrap();
        file = open_snapshot(&path, Some(&path), resumed.matchups()).unwrap();
        resumed = resumed.apply_vote("2", "1").unwrap();
        write_vote(&mut file, resumed.matchups().last().unwrap()).unwrap();
        drop(file);

        let text = std::fs::read_to_string(&path).unwrap();
        let indices: Vec<usize> = text
            .lines()
            .map(|line| serde_json::from_str::<Matchup>(line).unwrap().sequence_index)
            .collect();
        assert_eq!(indices, vec![0, 1]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_fresh_session_refuses_occupied_snapshot() {
        let path = temp_path("occupied");
        std::fs::write(&path, "{\"winner\":\"1\",\"loser\":\"2\",\"sequence_index\":0}\n").unwrap();

        let state = SessionState::new(make_items()).unwrap();
        let err = open_snapshot(&path, None, state.matchups()).unwrap_err();
        assert!(err.contains("already holds votes"), "unexpected error: {err}");
        // Refusal leaves the old snapshot intact.
        assert_eq!(read_file(&path).len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_blank_snapshot_counts_as_empty() {
        let path = temp_path("blank");
        std::fs::write(&path, "\n  \n").unwrap();

        let state = SessionState::new(make_items()).unwrap();
        drop(open_snapshot(&path, None, state.matchups()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        let _ = std::fs::remove_file(&path);
    }
}
