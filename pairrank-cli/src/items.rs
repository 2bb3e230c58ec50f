/// Item loading: JSON (strings or song objects) or plain text, one per line.
use pairrank_core::Item;
use serde::Deserialize;

/// One entry of a JSON items file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Name(String),
    Song {
        id: Option<String>,
        name: String,
        artist: Option<String>,
        uri: Option<String>,
    },
}

/// Parse items from file content.
///
/// Content starting with `[` is read as a JSON array of strings or of
/// `{id?, name, artist?, uri?}` objects; anything else is one item name per
/// line. Entries without an ID get their 1-based position as ID.
pub fn parse_items_from_str(content: &str) -> Result<Vec<Item>, serde_json::Error> {
    let trimmed = content.trim();

    if trimmed.starts_with('[') {
        let raw: Vec<RawItem> = serde_json::from_str(trimmed)?;
        let items = raw
            .into_iter()
            .map(|entry| match entry {
                RawItem::Name(name) => (None, name, None, None),
                RawItem::Song { id, name, artist, uri } => (id, name, artist, uri),
            })
            .filter(|(_, name, _, _)| !name.trim().is_empty())
            .enumerate()
            .map(|(i, (id, name, artist, uri))| Item {
                id: id.unwrap_or_else(|| (i + 1).to_string()),
                name: name.trim().to_string(),
                artist,
                uri,
            })
            .collect();
        return Ok(items);
    }

    Ok(trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| Item::new((i + 1).to_string(), line))
        .collect())
}

/// A small built-in song list for trying the tool without an items file.
pub fn demo_items() -> Vec<Item> {
    [
        ("1", "Blinding Lights", "The Weeknd"),
        ("2", "Levitating", "Dua Lipa"),
        ("3", "Watermelon Sugar", "Harry Styles"),
        ("4", "Save Your Tears", "The Weeknd"),
        ("5", "Peaches", "Justin Bieber ft. Daniel Caesar, Giveon"),
        ("6", "good 4 u", "Olivia Rodrigo"),
        ("7", "Stay", "The Kid LAROI, Justin Bieber"),
        ("8", "MONTERO (Call Me By Your Name)", "Lil Nas X"),
        ("9", "Kiss Me More", "Doja Cat ft. SZA"),
        ("10", "Bad Habits", "Ed Sheeran"),
    ]
    .into_iter()
    .map(|(id, name, artist)| Item::new(id, name).with_artist(artist))
    .collect()
}
