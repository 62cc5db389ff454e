//! Core bot logic using the Poise framework.

use crate::error::{BotError, BotResult};
use crate::ticker::RegistrationTicker;
use crate::transport::SerenityTransport;
use informal_commands::{create_framework, Data, Error, SharedEngine};
use informal_common::{now_shifted, Clock, SystemClock};
use informal_config::Config;
use informal_registry::{notice, DeferredTasks, Dispatcher, RegistrationEngine};
use parking_lot::Mutex;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Ticker slot filled once the gateway is ready.
type TickerSlot = Arc<Mutex<Option<RegistrationTicker>>>;

/// Main bot structure.
pub struct InformalBot {
    config: Arc<Config>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InformalBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InformalBot").finish_non_exhaustive()
    }
}

/// Gateway intents: guild metadata plus message content in guild channels.
#[must_use]
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Builds the engine described by `config` and marks the configured
/// channels as monitored.
pub fn build_engine(config: &Config, clock: Arc<dyn Clock>) -> BotResult<RegistrationEngine> {
    let mut engine = RegistrationEngine::from_config(&config.registration, clock)?;
    for channel in &config.discord.channels {
        engine.watch(*channel);
    }

    info!(
        channels = config.discord.channels.len(),
        open = config.registration.open_minute,
        close = config.registration.close_minute,
        capacity = config.registration.capacity,
        "Registration engine ready"
    );
    Ok(engine)
}

impl InformalBot {
    /// Creates a new bot instance running on the system clock.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new bot instance on the given clock.
    #[must_use]
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: Arc::new(config),
            clock,
        }
    }

    /// Connects to Discord and runs until the client stops or Ctrl-C is
    /// received.
    pub async fn start(&self) -> BotResult<()> {
        let engine: SharedEngine = Arc::new(Mutex::new(build_engine(
            &self.config,
            Arc::clone(&self.clock),
        )?));
        let deferred = DeferredTasks::new();
        let ticker: TickerSlot = Arc::new(Mutex::new(None));

        let startup = Startup {
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
            engine,
            deferred: deferred.clone(),
            ticker: Arc::clone(&ticker),
        };

        let framework = create_framework()
            .setup(move |ctx, ready, framework| Box::pin(startup.run(ctx, ready, framework)))
            .build();

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, intents())
            .framework(framework)
            .await?;

        info!("Discord client created");

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }

            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;

            let running = ticker.lock().take();
            if let Some(running) = running {
                if let Err(e) = running.shutdown().await {
                    warn!("{:#}", e);
                }
            }
            deferred.shutdown();

            info!("Discord client shutdown complete");
        });

        info!("Informal registration bot is starting up...");
        client.start().await?;

        info!("Informal registration bot has shut down");
        Ok(())
    }
}

/// Everything the setup hook needs once the gateway is ready.
struct Startup {
    config: Arc<Config>,
    clock: Arc<dyn Clock>,
    engine: SharedEngine,
    deferred: DeferredTasks,
    ticker: TickerSlot,
}

impl Startup {
    async fn run(
        self,
        ctx: &serenity::Context,
        ready: &serenity::Ready,
        framework: &poise::Framework<Data, Error>,
    ) -> Result<Data, Error> {
        info!("Bot connected as: {}", ready.user.name);
        info!("Connected to {} guilds", ready.guilds.len());

        let commands = &framework.options().commands;
        match self.config.discord.guild_id.and_then(informal_commands::convert::to_guild) {
            Some(guild) => {
                poise::builtins::register_in_guild(ctx, commands, guild).await?;
                info!("Slash commands registered in guild {}", guild);
            }
            None => {
                poise::builtins::register_globally(ctx, commands).await?;
                info!("Slash commands registered globally");
            }
        }

        let transport = Arc::new(SerenityTransport::new(Arc::clone(&ctx.http)));
        let dispatcher = Dispatcher::new(
            transport,
            self.deferred.clone(),
            self.config.registration.notice_ttl(),
        );

        let ticker = RegistrationTicker::start(Arc::clone(&self.engine), dispatcher.clone())
            .await
            .map_err(BotError::from)?;
        *self.ticker.lock() = Some(ticker);

        self.announce_startup(&dispatcher).await;

        Ok(Data {
            engine: self.engine,
            dispatcher,
        })
    }

    /// Posts the startup message to the test channel and removes it after
    /// the startup TTL.
    async fn announce_startup(&self, dispatcher: &Dispatcher) {
        let Some(channel) = self.config.discord.test_channel_id else {
            return;
        };

        let now = now_shifted(self.clock.as_ref(), self.config.registration.offset());
        match dispatcher.transport().send(channel, &notice::startup(&now)).await {
            Ok(sent) => {
                dispatcher.delete_after(sent.message, self.config.registration.startup_notice_ttl());
                info!(%channel, "Startup message sent");
            }
            Err(e) => warn!(%channel, "Failed to send startup message: {}", e),
        }
    }
}
