//! Main entry point for the rotation binary
//!
//! Runs one rotation command against the JSON file store, wiring the
//! coordinator to the assignment selector configured from the environment
//! and command-line flags.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rotation::{
    format_member_list, rotation_summary, FileRotationStore, RotationCoordinator, RotationError,
};
use selector::{LargePoolPolicy, SelectorConfig};
use shared::{logging, GuildId, MemberId, Permissions, RotationId, SelectionMode};

/// Gift-exchange rotations: open, join, start and inspect
#[derive(Parser)]
#[command(name = "rotation")]
#[command(about = "Runs gift-exchange rotations and computes who gives to whom")]
pub struct Args {
    /// Rotation store snapshot
    #[arg(long, env = "ROTATION_STORE", default_value = "./rotations.json")]
    pub store: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seed for random selection (overrides SELECTOR_SEED)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Largest pool searched exhaustively in optimal mode (overrides SELECTOR_EXHAUSTIVE_LIMIT)
    #[arg(long)]
    pub exhaustive_limit: Option<usize>,

    /// Optimal mode above the exhaustive limit: reject or matching (overrides SELECTOR_LARGE_POOLS)
    #[arg(long)]
    pub large_pools: Option<LargePoolPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a rotation in a guild
    New {
        #[arg(long)]
        guild: String,
        #[arg(long)]
        initiator: String,
        /// random (auto) or optimal (magic)
        #[arg(long, default_value = "random")]
        mode: SelectionMode,
    },

    /// Join an open rotation
    Join {
        #[arg(long)]
        rotation: RotationId,
        #[arg(long)]
        member: String,
    },

    /// Start a rotation and compute its assignments
    Start {
        #[arg(long)]
        rotation: RotationId,
        #[arg(long)]
        caller: String,
        /// Caller permission bits, as delivered by the chat platform
        #[arg(long, default_value = "0")]
        permissions: Permissions,
    },

    /// Delete the guild's open rotation
    Delete {
        #[arg(long)]
        guild: String,
        #[arg(long)]
        caller: String,
        #[arg(long, default_value = "0")]
        permissions: Permissions,
    },

    /// Show the guild's latest rotation
    Show {
        #[arg(long)]
        guild: String,
    },

    /// Show prior pairings across the guild's started rotations
    History {
        #[arg(long)]
        guild: String,
    },
}

impl Args {
    /// Environment configuration with command-line overrides applied
    fn selector_config(&self) -> anyhow::Result<SelectorConfig> {
        let mut config = SelectorConfig::from_env().context("Invalid selector environment")?;

        if let Some(limit) = self.exhaustive_limit {
            config.exhaustive_limit = limit;
        }
        if let Some(policy) = self.large_pools {
            config.large_pools = policy;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));
    logging::log_startup(&format!("rotation (store: {})", args.store.display()));

    let config = args.selector_config()?;
    let store = FileRotationStore::open(&args.store)
        .await
        .with_context(|| format!("Failed to open rotation store {}", args.store.display()))?;
    let coordinator = RotationCoordinator::new(store, &config)?;

    if let Err(e) = run(&coordinator, args.command).await {
        logging::log_error("Rotation command", &e);
        return Err(e.into());
    }
    Ok(())
}

async fn run(
    coordinator: &RotationCoordinator<FileRotationStore>,
    command: Command,
) -> Result<(), RotationError> {
    match command {
        Command::New {
            guild,
            initiator,
            mode,
        } => {
            let rotation = coordinator
                .create_rotation(GuildId::new(guild), MemberId::new(initiator), mode)
                .await?;
            logging::log_success(&format!("Opened rotation {}", rotation.id));
            println!("{}", rotation.id);
        }

        Command::Join { rotation, member } => {
            let rotation = coordinator.join(rotation, MemberId::new(member)).await?;
            println!("{}", rotation_summary(&rotation));
        }

        Command::Start {
            rotation,
            caller,
            permissions,
        } => {
            let rotation = coordinator
                .start(rotation, &MemberId::new(caller), permissions)
                .await?;
            logging::log_success(&format!(
                "Rotation started for {}",
                format_member_list(&rotation.members)
            ));
            println!("{}", rotation_summary(&rotation));
        }

        Command::Delete {
            guild,
            caller,
            permissions,
        } => {
            let deleted = coordinator
                .delete_open_rotation(&GuildId::new(guild), &MemberId::new(caller), permissions)
                .await?;
            logging::log_success(&format!("Deleted rotation {}", deleted.id));
            if let Some(message_id) = deleted.message_id {
                println!("{message_id}");
            }
        }

        Command::Show { guild } => {
            let rotation = coordinator.latest_rotation(&GuildId::new(guild)).await?;
            println!("{}", rotation_summary(&rotation));
        }

        Command::History { guild } => {
            let history = coordinator.guild_history(&GuildId::new(guild)).await?;
            let mut rows: Vec<_> = history.iter().collect();
            rows.sort();
            for (sender, receiver, count) in rows {
                println!("{sender} → {receiver}: {count}");
            }
        }
    }

    Ok(())
}
