//! Test helpers and builder patterns for rotation tests

use rotation::{MemoryRotationStore, MockRotationStore, Rotation, RotationCoordinator};
use selector::AssignmentSelector;
use shared::{AssignmentSet, MemberId, SelectionMode};
use std::collections::HashSet;

use super::fixtures::TestFixtures;

/// Builder for mock stores with permissive defaults for reads
pub struct MockStoreBuilder {
    store: MockRotationStore,
}

impl MockStoreBuilder {
    pub fn new() -> Self {
        Self {
            store: MockRotationStore::new(),
        }
    }

    /// `get_rotation` answers with `rotation`
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.store
            .expect_get_rotation()
            .returning(move |_| Ok(Some(rotation.clone())))
            .times(0..);
        self
    }

    /// `assignment_history` answers with no prior pairs
    pub fn with_empty_history(mut self) -> Self {
        self.store
            .expect_assignment_history()
            .returning(|_, _| Ok(vec![]))
            .times(0..);
        self
    }

    /// Customize the store beyond the defaults
    pub fn with<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockRotationStore),
    {
        setup(&mut self.store);
        self
    }

    pub fn build(self) -> RotationCoordinator<MockRotationStore> {
        let selector = AssignmentSelector::new(&TestFixtures::config()).unwrap();
        RotationCoordinator::with_selector(self.store, selector)
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    pub fn memory_coordinator() -> RotationCoordinator<MemoryRotationStore> {
        RotationCoordinator::new(MemoryRotationStore::new(), &TestFixtures::config()).unwrap()
    }

    /// Open a rotation hosted by the standard host and join `members`
    pub async fn open_with_members(
        coordinator: &RotationCoordinator<MemoryRotationStore>,
        mode: SelectionMode,
        members: &[MemberId],
    ) -> Rotation {
        let mut rotation = coordinator
            .create_rotation(TestFixtures::guild(), TestFixtures::host(), mode)
            .await
            .unwrap();
        for member in members {
            rotation = coordinator.join(rotation.id, member.clone()).await.unwrap();
        }
        rotation
    }

    /// Open, fill and start a rotation as its host
    pub async fn run_rotation(
        coordinator: &RotationCoordinator<MemoryRotationStore>,
        mode: SelectionMode,
        members: &[MemberId],
    ) -> Rotation {
        let rotation = Self::open_with_members(coordinator, mode, members).await;
        coordinator
            .start(rotation.id, &TestFixtures::host(), TestFixtures::no_permissions())
            .await
            .unwrap()
    }

    /// Assert the rotation is started with a derangement of its members
    pub fn assert_started(rotation: &Rotation) {
        assert!(!rotation.is_open(), "rotation should be started");
        assert!(rotation.started_at.is_some());
        let assignments = rotation.assignments.as_ref().expect("started rotation has assignments");
        assert!(
            assignments.verify(&rotation.members).is_ok(),
            "invalid assignment: {:?}",
            assignments
        );
    }

    /// Edges `(sender, receiver)` of an assignment
    pub fn edges(assignments: &AssignmentSet) -> HashSet<(MemberId, MemberId)> {
        assignments
            .iter()
            .map(|pair| (pair.sender.clone(), pair.receiver.clone()))
            .collect()
    }
}
