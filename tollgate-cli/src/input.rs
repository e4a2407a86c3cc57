use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use clap::Parser;
use tollgate_core::model::VehicleCategory;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Price one vehicle's toll passages for a single day.
#[derive(Debug, Parser)]
#[command(name = "tollgate", version)]
pub(crate) struct Args {
    /// Vehicle category (ordinary, motorbike, tractor, emergency, diplomat, foreign, military)
    #[arg(short, long, default_value = "ordinary")]
    pub vehicle: VehicleCategory,

    /// TOML configuration with tariff, ordering policy and extra holiday tables
    #[arg(short, long, env = "TOLLGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON file holding an array of local timestamps
    #[arg(short = 'f', long)]
    pub passages_file: Option<PathBuf>,

    /// Local timestamps such as 2013-02-07T06:23
    pub passages: Vec<String>,
}

impl Args {
    /// Collect passages from the file (if any) followed by the positional arguments.
    pub(crate) fn passages(&self) -> Result<Vec<NaiveDateTime>> {
        let mut passages = match &self.passages_file {
            Some(path) => read_passages_file(path)?,
            None => Vec::new(),
        };

        for raw in &self.passages {
            passages.push(parse_timestamp(raw)?);
        }

        if passages.is_empty() {
            bail!("No passages given; pass timestamps or --passages-file");
        }

        Ok(passages)
    }
}

fn read_passages_file(path: &Path) -> Result<Vec<NaiveDateTime>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read passages from {}", path.display()))?;
    let entries: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of timestamps", path.display()))?;

    entries.iter().map(String::as_str).map(parse_timestamp).collect()
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .with_context(|| format!("Unrecognised timestamp: {raw}"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn expected(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 2, 7)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("valid timestamp")
    }

    #[test]
    fn accepts_iso_and_space_separated_timestamps() {
        assert_eq!(parse_timestamp("2013-02-07T06:23:27").ok(), Some(expected(6, 23, 27)));
        assert_eq!(parse_timestamp("2013-02-07T06:23").ok(), Some(expected(6, 23, 0)));
        assert_eq!(parse_timestamp(" 2013-02-07 15:47:00 ").ok(), Some(expected(15, 47, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday at noon").is_err());
        assert!(parse_timestamp("2013-02-30 06:00").is_err());
    }

    #[test]
    fn parses_vehicle_and_positional_passages() {
        let args = Args::try_parse_from([
            "tollgate",
            "--vehicle",
            "car",
            "2013-02-07T07:00",
            "2013-02-07T07:30",
        ])
        .expect("valid arguments");

        assert_eq!(args.vehicle, VehicleCategory::Ordinary);
        assert_eq!(
            args.passages().ok(),
            Some(vec![expected(7, 0, 0), expected(7, 30, 0)])
        );
    }

    #[test]
    fn unknown_vehicle_is_a_usage_error() {
        assert!(Args::try_parse_from(["tollgate", "--vehicle", "bus", "2013-02-07T07:00"]).is_err());
    }

    #[test]
    fn missing_passages_are_reported() {
        let args = Args::try_parse_from(["tollgate"]).expect("valid arguments");
        assert!(args.passages().is_err());
    }
}
