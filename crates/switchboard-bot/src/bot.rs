//! Gateway client and message handling.

use crate::commands::{build_registry, Services};
use crate::discord::{DiscordModeration, SerenityResponder};
use crate::error::BotResult;
use async_trait::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::{GatewayIntents, Ready};
use serenity::model::id as serenity_id;
use std::sync::Arc;
use switchboard_commands::{Authority, Dispatcher, Invocation, Permissions, PrefixLookup};
use switchboard_common::{is_alphabetic_word, ChannelId, GuildId, RoleId, UserId};
use switchboard_config::{Config, ConfigCache, GuildDirectory};
use tokio::sync::Notify;
use tracing::{debug, info};

/// Strips `prefix` from the start of a message.
///
/// Word prefixes must be followed by whitespace, so with prefix `bot` the
/// message `bot kick` matches and `botany` does not.
pub fn strip_prefix<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = content.strip_prefix(prefix)?;
    if is_alphabetic_word(prefix) && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim_start();
    (!rest.is_empty()).then_some(rest)
}

struct Handler {
    dispatcher: Dispatcher,
    directory: Arc<GuildDirectory>,
    config: Arc<ConfigCache>,
}

impl Handler {
    fn bot_permissions(
        ctx: &Context,
        guild_id: serenity_id::GuildId,
        channel_id: serenity_id::ChannelId,
    ) -> Permissions {
        let bot_id = ctx.cache.current_user().id;

        ctx.cache
            .guild(guild_id)
            .and_then(|guild| {
                let member = guild.members.get(&bot_id)?;
                let channel = guild.channels.get(&channel_id)?;
                Some(guild.user_permissions_in(channel, member))
            })
            .unwrap_or_else(|| {
                debug!("Permissions of the bot in guild {} are not cached", guild_id);
                Permissions::empty()
            })
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected as {} to {} guilds", ready.user.name, ready.guilds.len());
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.webhook_id.is_some() {
            return;
        }
        let Some(guild_id) = msg.guild_id else {
            return;
        };

        let prefix = self.directory.prefix(GuildId(guild_id.get()));
        let Some(content) = strip_prefix(&msg.content, &prefix) else {
            return;
        };
        let Some((command_name, raw_arguments)) = Invocation::split_content(content) else {
            return;
        };

        let roles = msg
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role| RoleId(role.get())).collect())
            .unwrap_or_default();

        let invocation = Invocation::new(
            GuildId(guild_id.get()),
            ChannelId(msg.channel_id.get()),
            UserId(msg.author.id.get()),
            command_name,
            raw_arguments,
        )
        .with_roles(roles)
        .with_bot_permissions(Self::bot_permissions(&ctx, guild_id, msg.channel_id));

        let dispatcher = self.dispatcher.clone();
        let responder = Arc::new(SerenityResponder::new(Arc::clone(&ctx.http)));
        let error_replies = self.config.get().commands.error_replies;

        // Failures are logged by the dispatcher.
        tokio::spawn(async move {
            let _ = if error_replies {
                dispatcher.handle(invocation, responder).await
            } else {
                dispatcher.dispatch(invocation, responder).await
            };
        });
    }
}

const fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        .union(GatewayIntents::GUILD_MESSAGES)
        .union(GatewayIntents::MESSAGE_CONTENT)
}

/// Main bot structure.
pub struct SwitchboardBot {
    config: Arc<ConfigCache>,
    directory: Arc<GuildDirectory>,
    shutdown: Arc<Notify>,
}

impl SwitchboardBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(ConfigCache::new(config));
        Self {
            directory: Arc::new(GuildDirectory::new(Arc::clone(&config))),
            config,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Builds the dispatcher over the built-in commands.
    pub fn dispatcher(&self, http: Arc<Http>) -> BotResult<Dispatcher> {
        let services = Services {
            directory: Arc::clone(&self.directory),
            moderation: Arc::new(DiscordModeration::new(http)),
            shutdown: Arc::clone(&self.shutdown),
        };
        let registry = build_registry(&services)?;
        info!("Registered {} commands", registry.len());

        let prefixes: Arc<dyn PrefixLookup> = self.directory.clone();
        let authority: Arc<dyn Authority> = self.directory.clone();
        Ok(Dispatcher::new(Arc::new(registry), prefixes, authority))
    }

    /// Starts the bot and runs until shut down.
    pub async fn start(&self) -> BotResult<()> {
        let token = self.config.get().discord.token.clone();
        let http = Arc::new(Http::new(&token));

        let handler = Handler {
            dispatcher: self.dispatcher(http)?,
            directory: Arc::clone(&self.directory),
            config: Arc::clone(&self.config),
        };

        let mut client = Client::builder(&token, intents())
            .event_handler(handler)
            .await?;

        let shard_manager = Arc::clone(&client.shard_manager);
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move {
            shutdown.notified().await;
            info!("Shutting down all shards");
            shard_manager.shutdown_all().await;
        });

        client.start().await?;
        Ok(())
    }
}
