//! Discord adapter built on serenity

use std::fmt;
use std::sync::Arc;

use serenity::all::{
    Channel, ChannelType, Client, Context, CreateAllowedMentions, CreateMessage, EventHandler,
    GatewayIntents, Http, Message, Ready,
};
use serenity::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Category, IncomingMessage};
use crate::domain::traits::{LanguageService, ReplySink};

/// Reply to one Discord message without pinging its author
pub struct DiscordReply<'a> {
    http: &'a Arc<Http>,
    message: &'a Message,
}

impl<'a> DiscordReply<'a> {
    pub fn new(http: &'a Arc<Http>, message: &'a Message) -> Self {
        Self { http, message }
    }
}

#[async_trait]
impl<'a> ReplySink for DiscordReply<'a> {
    async fn send_reply(&self, text: &str) -> Result<(), BotError> {
        let builder = CreateMessage::new()
            .content(text)
            .reference_message(self.message)
            .allowed_mentions(CreateAllowedMentions::new().replied_user(false));

        self.message
            .channel_id
            .send_message(self.http, builder)
            .await
            .map(|_| ())
            .map_err(|e| BotError::ReplyFailed(e.to_string()))
    }
}

fn is_thread(kind: ChannelType) -> bool {
    matches!(
        kind,
        ChannelType::PublicThread | ChannelType::PrivateThread | ChannelType::NewsThread
    )
}

/// Category of the message's channel. Threads inherit their parent's.
async fn resolve_category(ctx: &Context, msg: &Message) -> Option<Category> {
    let channel = match msg.channel(ctx).await {
        Ok(Channel::Guild(channel)) => channel,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!("[{}] Failed to resolve channel: {}", msg.channel_id, e);
            return None;
        }
    };

    let category_id = if is_thread(channel.kind) {
        match channel.parent_id?.to_channel(ctx).await {
            Ok(Channel::Guild(parent)) => parent.parent_id?,
            _ => return None,
        }
    } else {
        channel.parent_id?
    };

    let name = match category_id.to_channel(ctx).await {
        Ok(Channel::Guild(category)) => category.name,
        _ => String::new(),
    };
    Some(Category::new(category_id.get(), name))
}

/// Handler for Discord gateway events
pub struct DiscordHandler<L: LanguageService> {
    dispatcher: Arc<MessageDispatcher<L>>,
}

impl<L: LanguageService> DiscordHandler<L> {
    pub fn new(dispatcher: Arc<MessageDispatcher<L>>) -> Self {
        Self { dispatcher }
    }

    /// Gateway intents needed to read guild message text
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl<L: LanguageService + 'static> EventHandler for DiscordHandler<L> {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(
            "Translator bot active as {} in {} guild(s), watching {} categor(ies)",
            ready.user.name,
            ready.guilds.len(),
            self.dispatcher.filter().watched().len()
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip bot messages before any lookup
        if msg.author.bot {
            return;
        }

        let incoming = IncomingMessage::new(msg.channel_id.get(), msg.content.clone())
            .with_id(msg.id.to_string())
            .from_bot(msg.author.bot);
        let category = resolve_category(&ctx, &msg).await;

        let reply = DiscordReply::new(&ctx.http, &msg);
        self.dispatcher
            .dispatch(&incoming, category.as_ref(), &reply)
            .await;
    }
}

/// Discord bot adapter
pub struct DiscordAdapter<L: LanguageService> {
    token: String,
    dispatcher: Arc<MessageDispatcher<L>>,
}

impl<L: LanguageService> fmt::Debug for DiscordAdapter<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordAdapter")
            .field("token", &"[redacted]")
            .field("watched_categories", &self.dispatcher.filter().watched().len())
            .field("target", &self.dispatcher.translator().target())
            .finish()
    }
}

impl<L: LanguageService + 'static> DiscordAdapter<L> {
    pub fn new(token: impl Into<String>, dispatcher: Arc<MessageDispatcher<L>>) -> Self {
        Self {
            token: token.into(),
            dispatcher,
        }
    }

    /// Connect to the gateway and handle events until the client stops
    pub async fn start(self) -> Result<(), BotError> {
        tracing::info!("Starting Discord bot: {:?}", self);

        let mut client = Client::builder(&self.token, DiscordHandler::<L>::intents())
            .event_handler(DiscordHandler::new(self.dispatcher))
            .await
            .map_err(|e| BotError::Network(format!("Failed to build Discord client: {}", e)))?;

        client
            .start()
            .await
            .map_err(|e| BotError::Network(format!("Discord client stopped: {}", e)))
    }
}
