/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::config::*;
use chrono::{DateTime, NaiveDateTime};
use connector::RequestConfig;
use async_trait::async_trait;
use console::Confirm;
use std::fmt::Display;
use std::io::{self, Write};
use std::process::exit;

/// Prints the error and terminates.
pub fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }
}

pub fn get_request_config() -> Result<RequestConfig, String> {
    let config = load_config()?;

    let server_url = config.get(&ConfigKey::Server).cloned().flatten().ok_or_else(|| {
        "Server URL not set. Use `compass config server <url>` to set it.".to_string()
    })?;
    let token = config
        .get(&ConfigKey::AuthToken)
        .cloned()
        .flatten()
        .filter(|t| !t.is_empty());

    Ok(RequestConfig { server_url, token })
}

/// RFC 3339 timestamp converted to naive UTC.
pub fn parse_until(value: &str) -> Result<NaiveDateTime, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .map_err(|e| format!("Invalid end date \"{}\": {}", value, e))
}

pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Asks on stdin. Anything but y/yes declines.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();

        tokio::task::spawn_blocking(move || {
            print!("{} [y/N] ", prompt);
            if io::stdout().flush().is_err() {
                return false;
            }

            let mut answer = String::new();
            match io::stdin().read_line(&mut answer) {
                Ok(_) => is_confirmation(&answer),
                Err(_) => false,
            }
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(is_confirmation("y\n"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }

    #[test]
    fn test_parse_until_normalizes_to_utc() {
        let parsed = parse_until("2026-09-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_string(), "2026-09-01 10:00:00");
        assert!(parse_until("next friday").is_err());
    }
}
