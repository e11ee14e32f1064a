//! Submit command implementation
//!
//! Reads a loosely-keyed payload JSON file, runs it through the full
//! ingestion path and prints the persisted record.

use crate::config::load_config;
use crate::core::ingest::Submission;
use crate::core::Console;
use crate::domain::{ClinicalPayload, UserId};
use clap::Args;
use std::str::FromStr;

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Path to a JSON file with the clinical payload
    #[arg(short, long)]
    pub payload: String,

    /// Patient display name
    #[arg(long)]
    pub patient_name: Option<String>,

    /// Submitting user id
    #[arg(short, long)]
    pub user: Option<String>,
}

impl SubmitArgs {
    /// Execute the submit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let console = Console::from_config(&config)?;

        let raw = std::fs::read_to_string(&self.payload)?;
        let loose: serde_json::Value = serde_json::from_str(&raw)?;
        let payload = ClinicalPayload::from_loose_json(&loose);

        let submitted_by = match self.user {
            Some(ref uid) => Some(
                UserId::from_str(uid).map_err(|e| anyhow::anyhow!("Invalid user id: {e}"))?,
            ),
            None => None,
        };

        let submission = Submission {
            patient_name: self.patient_name.clone(),
            payload,
            submitted_by,
        };

        match console.gateway().submit(submission).await {
            Ok(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Submission failed: {e}");
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: SubmitArgs,
        }

        let wrapper =
            Wrapper::parse_from(["test", "--payload", "p.json", "--patient-name", "A"]);
        assert_eq!(wrapper.args.payload, "p.json");
        assert_eq!(wrapper.args.patient_name, Some("A".to_string()));
        assert!(wrapper.args.user.is_none());
    }
}
