//! Chat command implementation
//!
//! One-shot or interactive conversation with the clinical assistant.
//! The transcript is session-local; `/note` asks the backend to turn it
//! into a structured doctor note.

use crate::adapters::assistant::AssistantClient;
use crate::config::load_config;
use crate::domain::{ChatMessage, Sender, UserId};
use clap::Args;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Send a single message and print the reply
    #[arg(short, long)]
    pub message: Option<String>,

    /// User id the transcript belongs to
    #[arg(short, long)]
    pub user: Option<String>,
}

impl ChatArgs {
    /// Execute the chat command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;

        if !config.assistant.enabled {
            eprintln!("❌ Assistant is disabled; enable [assistant] in the configuration");
            return Ok(2);
        }
        let client = AssistantClient::new(&config.assistant)?;

        let uid = match self.user {
            Some(ref raw) => Some(
                UserId::from_str(raw).map_err(|e| anyhow::anyhow!("Invalid user id: {e}"))?,
            ),
            None => None,
        };

        if let Some(ref message) = self.message {
            let reply = client.chat(message).await?;
            println!("{reply}");
            return Ok(0);
        }

        self.interactive(&client, uid).await
    }

    /// Interactive loop: read lines, keep the transcript, `/note` to
    /// generate a doctor note, `/quit` to exit
    async fn interactive(
        &self,
        client: &AssistantClient,
        uid: Option<UserId>,
    ) -> anyhow::Result<i32> {
        let mut transcript: Vec<ChatMessage> = Vec::new();
        let stdin = std::io::stdin();

        println!("💬 Clinical assistant; /note for a doctor note, /quit to exit");

        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();

            match line {
                "" => continue,
                "/quit" => break,
                "/note" => {
                    if transcript.is_empty() {
                        println!("(nothing to summarize yet)");
                        continue;
                    }
                    match client.generate_note(&transcript).await {
                        Ok(note) => println!("{note}"),
                        Err(e) => eprintln!("❌ Note generation failed: {e}"),
                    }
                }
                message => {
                    transcript.push(ChatMessage::now(Sender::User, message, uid.clone()));
                    match client.chat(message).await {
                        Ok(reply) => {
                            println!("{reply}");
                            transcript.push(ChatMessage::now(
                                Sender::Assistant,
                                reply,
                                uid.clone(),
                            ));
                        }
                        Err(e) => eprintln!("❌ Chat failed: {e}"),
                    }
                }
            }
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ChatArgs,
        }

        let wrapper = Wrapper::parse_from(["test", "--message", "hello"]);
        assert_eq!(wrapper.args.message, Some("hello".to_string()));
    }
}
