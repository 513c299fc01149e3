//! Service-specific tests
//!
//! Each store has its own test file; the shared contract checks live in
//! `common` and run against both.

mod file_store;

pub mod common {
    use chrono::Utc;
    use shared::{AssignmentSet, GuildId, MemberId, SelectionMode};

    use crate::core::Rotation;
    use crate::error::RotationError;
    use crate::traits::RotationStore;

    pub fn members(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().map(|&id| MemberId::from(id)).collect()
    }

    /// Each member sends to the next one in join order
    pub fn cycle(pool: &[MemberId]) -> AssignmentSet {
        let mut receivers = pool.to_vec();
        receivers.rotate_left(1);
        AssignmentSet::zip(pool, receivers)
    }

    /// Open a rotation in `guild` and join `ids`
    pub async fn open_with<S: RotationStore>(store: &S, guild: &str, ids: &[&str]) -> Rotation {
        let rotation = Rotation::open(GuildId::from(guild), MemberId::from("host"), SelectionMode::Random);
        let rotation_id = rotation.id;
        store.insert_rotation(rotation.clone()).await.unwrap();

        let mut current = rotation;
        for member in members(ids) {
            current = store.add_member(rotation_id, member).await.unwrap();
        }
        current
    }

    /// Lifecycle checks every store must pass
    pub async fn exercise_contract<S: RotationStore>(store: &S) {
        let guild = GuildId::from("guild");
        let rotation = open_with(store, "guild", &["a", "b", "c"]).await;

        // One open rotation per guild
        let duplicate = Rotation::open(guild.clone(), MemberId::from("b"), SelectionMode::Optimal);
        assert!(matches!(
            store.insert_rotation(duplicate).await,
            Err(RotationError::RotationAlreadyOpen { .. })
        ));

        assert!(matches!(
            store.add_member(rotation.id, MemberId::from("a")).await,
            Err(RotationError::AlreadyJoined { .. })
        ));

        store
            .set_message_id(rotation.id, "message-1".to_string())
            .await
            .unwrap();

        let started = store
            .finalize_rotation(rotation.id, cycle(&rotation.members), Utc::now())
            .await
            .unwrap();
        assert!(!started.is_open());
        assert_eq!(started.message_id.as_deref(), Some("message-1"));

        // Second finalize loses the compare-and-swap
        assert!(matches!(
            store
                .finalize_rotation(rotation.id, cycle(&rotation.members), Utc::now())
                .await,
            Err(RotationError::RotationAlreadyStarted { .. })
        ));
        assert!(matches!(
            store.add_member(rotation.id, MemberId::from("d")).await,
            Err(RotationError::RotationAlreadyStarted { .. })
        ));
        assert!(matches!(
            store.delete_rotation(rotation.id).await,
            Err(RotationError::RotationAlreadyStarted { .. })
        ));

        assert!(store.open_rotation_for_guild(&guild).await.unwrap().is_none());
        let history = store.assignment_history(&guild, &[]).await.unwrap();
        assert_eq!(history.len(), 3);

        // The guild can open again, and the newest rotation is reported latest
        let next = open_with(store, "guild", &[]).await;
        let latest = store.latest_rotation_for_guild(&guild).await.unwrap().unwrap();
        assert_eq!(latest.id, next.id);

        let deleted = store.delete_rotation(next.id).await.unwrap();
        assert_eq!(deleted.id, next.id);
        assert!(store.get_rotation(next.id).await.unwrap().is_none());
        assert_eq!(
            store.latest_rotation_for_guild(&guild).await.unwrap().map(|r| r.id),
            Some(rotation.id)
        );
    }
}
