//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::ValueEnum;
use dialoguer::Confirm;
use docsign::model::QrFormat;
use serde::Serialize;

use crate::error::CliError;

/// QR output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum QrFormatArg {
    /// PNG image bytes
    Png,
    /// data:image/png;base64 URL
    Dataurl,
}

impl From<QrFormatArg> for QrFormat {
    fn from(arg: QrFormatArg) -> Self {
        match arg {
            QrFormatArg::Png => QrFormat::Png,
            QrFormatArg::Dataurl => QrFormat::DataUrl,
        }
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write bytes to `path`, reporting the size written.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    std::fs::write(path, bytes)?;
    println!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Ask for confirmation unless `assume_yes` is set.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))
}

/// Parse a value through `FromStr`, turning the error into a config error.
pub fn parse_arg<T>(what: &str, value: &str) -> Result<T, CliError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse()
        .map_err(|e| CliError::Config(format!("Invalid {} '{}': {}", what, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsign::model::ProjectStatus;

    #[test]
    fn test_qr_format_conversion() {
        assert_eq!(QrFormat::from(QrFormatArg::Png), QrFormat::Png);
        assert_eq!(QrFormat::from(QrFormatArg::Dataurl), QrFormat::DataUrl);
    }

    #[test]
    fn test_confirm_assume_yes_skips_prompt() {
        assert!(confirm("Delete?", true).unwrap());
    }

    #[test]
    fn test_parse_arg() {
        let status: ProjectStatus = parse_arg("status", "active").unwrap();
        assert_eq!(status, ProjectStatus::Active);

        let err = parse_arg::<ProjectStatus>("status", "bogus").unwrap_err();
        assert!(err.to_string().contains("Invalid status 'bogus'"));
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");

        write_output(&path, b"\x89PNG").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
    }
}
