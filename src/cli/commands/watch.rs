//! Watch command implementation
//!
//! Signs the session in and keeps the dashboard refreshing (periodic
//! timer plus any submissions from other processes landing in the store)
//! until a shutdown signal arrives.

use crate::config::load_config;
use crate::core::Console;
use crate::domain::UserId;
use clap::Args;
use std::str::FromStr;
use tokio::sync::watch;

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// User id to sign in as
    #[arg(short, long)]
    pub user: String,
}

impl WatchArgs {
    /// Execute the watch command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let console = Console::from_config(&config)?;

        let user =
            UserId::from_str(&self.user).map_err(|e| anyhow::anyhow!("Invalid user id: {e}"))?;

        println!("👁  Watching dashboard as {user}; Ctrl+C to stop");
        console.scheduler().on_signed_in(user).await;

        // Wait for the shutdown signal
        loop {
            if *shutdown_signal.borrow() {
                break;
            }
            if shutdown_signal.changed().await.is_err() {
                break;
            }
        }

        console.scheduler().on_signed_out().await;
        println!("Signed out; charts released");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: WatchArgs,
        }

        let wrapper = Wrapper::parse_from(["test", "--user", "uid-1"]);
        assert_eq!(wrapper.args.user, "uid-1");
    }
}
