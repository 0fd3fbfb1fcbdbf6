pub mod auth;
pub mod calories;
pub mod fridge;
pub mod preferences;
pub mod recipes;
pub mod saved;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use super::errors::CliError;

/// Prints `prompt` and reads one line from stdin. EOF reads as an empty answer.
pub async fn ask(prompt: &str) -> Result<String, CliError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line.trim().to_string())
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("nope"));
    }
}
