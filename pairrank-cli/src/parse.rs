//! Parsing of interactive commands typed at the prompt.
//!
//! Positions are 1-based on input (as displayed in the ranking table) and
//! 0-based in the returned `Command`.

/// Which side of the current pair won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Vote(Choice),
    ToggleLock(usize),
    Move { from: usize, to: usize },
    Swap(usize, usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  1 | a        first song wins
  2 | b        second song wins
  l N          lock/unlock the song at position N
  m FROM TO    move the song at FROM to TO
  s I J        swap the songs at I and J (locked songs cannot be swapped)
  r            show the current ranking
  h | ?        show this help
  q            quit and print the final ranking";

fn parse_position(token: Option<&str>, what: &str) -> Result<usize, String> {
    let token = token.ok_or_else(|| format!("missing {what}"))?;
    let position: usize = token
        .parse()
        .map_err(|_| format!("invalid {what} \"{token}\""))?;
    if position == 0 {
        return Err(format!("{what} must be 1 or greater"));
    }
    Ok(position - 1)
}

/// Parse one input line into a command.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Err("empty input (type h for help)".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "1" | "a" | "left" => Command::Vote(Choice::First),
        "2" | "b" | "right" => Command::Vote(Choice::Second),
        "l" | "lock" => Command::ToggleLock(parse_position(tokens.next(), "position")?),
        "m" | "move" => Command::Move {
            from: parse_position(tokens.next(), "source position")?,
            to: parse_position(tokens.next(), "target position")?,
        },
        "s" | "swap" => Command::Swap(
            parse_position(tokens.next(), "first position")?,
            parse_position(tokens.next(), "second position")?,
        ),
        "r" | "ranking" => Command::Show,
        "h" | "?" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command \"{other}\" (type h for help)")),
    };

    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected argument \"{extra}\""));
    }
    Ok(command)
}
