//! Test fixtures and data for rotation tests

use rotation::Rotation;
use selector::SelectorConfig;
use shared::{GuildId, MemberId, Permissions, SelectionMode};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const GUILD: &'static str = "guild-1";
    pub const OTHER_GUILD: &'static str = "guild-2";
    pub const HOST: &'static str = "host";
    pub const SEED: u64 = 1_225;

    pub fn guild() -> GuildId {
        GuildId::from(Self::GUILD)
    }

    pub fn other_guild() -> GuildId {
        GuildId::from(Self::OTHER_GUILD)
    }

    pub fn host() -> MemberId {
        MemberId::from(Self::HOST)
    }

    pub fn member(id: &str) -> MemberId {
        MemberId::from(id)
    }

    pub fn members(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|&id| MemberId::from(id)).collect()
    }

    /// The host plus three guests
    pub fn quartet() -> Vec<MemberId> {
        Self::members(&[Self::HOST, "bea", "cam", "dov"])
    }

    pub fn no_permissions() -> Permissions {
        Permissions::default()
    }

    pub fn admin() -> Permissions {
        Permissions::new(Permissions::ADMINISTRATOR)
    }

    pub fn guild_manager() -> Permissions {
        Permissions::new(Permissions::MANAGE_GUILD)
    }

    pub fn config() -> SelectorConfig {
        SelectorConfig::default().with_seed(Self::SEED)
    }

    /// Open rotation hosted by `host` in the standard guild
    pub fn open_rotation(mode: SelectionMode, members: &[&str]) -> Rotation {
        let mut rotation = Rotation::open(Self::guild(), Self::host(), mode);
        rotation.members = Self::members(members);
        rotation
    }
}
