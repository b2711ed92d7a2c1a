//! `.ydk` deck lists and engine scripts.

use std::path::Path;

use crate::DeskbotError;

/// Parses the main deck out of `.ydk` text.
///
/// Empty lines are skipped and so is any line not starting with a digit
/// (`#main`, `#extra`, comments). A line starting with `!` marks the side
/// deck and ends the main deck. A code line is read up to its first
/// non-digit.
///
/// # Errors
/// Returns the 1-based line number and reason for a code that doesn't fit
/// in 32 bits.
pub fn parse_ydk(text: &str) -> Result<Vec<u32>, (usize, String)> {
    let mut deck = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.starts_with('!') {
            break;
        }
        let digits_end = line
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(line.len());
        if digits_end == 0 {
            continue;
        }
        let digits = &line[..digits_end];
        let code = digits
            .parse::<u32>()
            .map_err(|_| (index + 1, format!("card code {digits} out of range")))?;
        deck.push(code);
    }
    Ok(deck)
}

/// Reads and parses a `.ydk` file.
pub async fn load_deck(path: &Path) -> Result<Vec<u32>, DeskbotError> {
    let text = read(path).await?;
    let deck = parse_ydk(&text).map_err(|(line, reason)| DeskbotError::Deck {
        path: path.to_owned(),
        line,
        reason,
    })?;
    tracing::info!(path = %path.display(), cards = deck.len(), "deck loaded");
    Ok(deck)
}

/// Reads a script file whole.
pub async fn load_script(path: &Path) -> Result<String, DeskbotError> {
    let script = read(path).await?;
    tracing::info!(path = %path.display(), size = script.len(), "script loaded");
    Ok(script)
}

async fn read(path: &Path) -> Result<String, DeskbotError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DeskbotError::Read {
            path: path.to_owned(),
            source,
        })
}
