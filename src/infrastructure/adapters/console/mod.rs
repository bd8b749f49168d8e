//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Category, IncomingMessage, ReplyOutcome};
use crate::domain::traits::{LanguageService, ReplySink};

/// Prints replies to stdout
#[derive(Debug, Default)]
pub struct ConsoleReply;

#[async_trait]
impl ReplySink for ConsoleReply {
    async fn send_reply(&self, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }
}

/// Console bot adapter: every stdin line is a message in a watched category
pub struct ConsoleAdapter {
    category: Category,
}

impl ConsoleAdapter {
    pub fn new(category_id: u64) -> Self {
        Self {
            category: Category::new(category_id, "console"),
        }
    }

    /// Read lines until EOF, running each through the dispatcher
    pub async fn run<L: LanguageService>(
        &self,
        dispatcher: &MessageDispatcher<L>,
    ) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode), Ctrl-D to quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let reply = ConsoleReply;
        let mut count: u64 = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BotError::Internal(format!("Failed to read stdin: {}", e)))?
        {
            if line.trim().is_empty() {
                continue;
            }
            count += 1;

            let message = IncomingMessage::new(0, line).with_id(count.to_string());
            let outcome = dispatcher
                .dispatch(&message, Some(&self.category), &reply)
                .await;

            if let Some(ReplyOutcome::Suppressed) = outcome {
                println!(
                    "[BOT] (no reply, already {})",
                    dispatcher.translator().target()
                );
            }
        }

        Ok(())
    }
}
