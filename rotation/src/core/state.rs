//! Rotation lifecycle state
//!
//! A rotation moves from `Open` (collecting members) to `Started` (assignment
//! finalized) exactly once. Every transition rule lives on [`Rotation`], so
//! each store applies the same checks under its own lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{AssignmentSet, GuildId, MemberId, Permissions, RotationId, SelectionMode};
use std::fmt;

use crate::error::{RotationError, RotationResult};

/// Fewest members a rotation can start with
pub const MIN_START_MEMBERS: usize = 3;

/// Lifecycle status of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationStatus {
    /// Accepting joins
    Open,
    /// Assignment computed and persisted; terminal
    Started,
}

impl fmt::Display for RotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationStatus::Open => write!(f, "open"),
            RotationStatus::Started => write!(f, "started"),
        }
    }
}

/// One gift-exchange rotation within a guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub id: RotationId,
    pub guild_id: GuildId,
    pub initiator_id: MemberId,
    pub mode: SelectionMode,
    pub status: RotationStatus,

    /// Members in join order
    pub members: Vec<MemberId>,

    /// Present iff the rotation has started
    #[serde(default)]
    pub assignments: Option<AssignmentSet>,

    /// Chat message carrying the rotation's controls
    #[serde(default)]
    pub message_id: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl Rotation {
    /// Open a new rotation with no members
    pub fn open(guild_id: GuildId, initiator_id: MemberId, mode: SelectionMode) -> Self {
        Self {
            id: RotationId::new(),
            guild_id,
            initiator_id,
            mode,
            status: RotationStatus::Open,
            members: Vec::new(),
            assignments: None,
            message_id: None,
            created_at: Utc::now(),
            started_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RotationStatus::Open
    }

    pub fn has_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    /// Whether the rotation is ready to be started
    pub fn can_start(&self) -> bool {
        self.is_open() && self.members.len() >= MIN_START_MEMBERS
    }

    /// Initiators and admin-equivalent callers may start or delete
    pub fn may_manage(&self, caller: &MemberId, permissions: Permissions) -> bool {
        &self.initiator_id == caller || permissions.is_admin()
    }

    pub fn ensure_open(&self) -> RotationResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(RotationError::RotationAlreadyStarted { rotation_id: self.id })
        }
    }

    pub fn ensure_manager(
        &self,
        caller: &MemberId,
        permissions: Permissions,
        action: &'static str,
    ) -> RotationResult<()> {
        if self.may_manage(caller, permissions) {
            Ok(())
        } else {
            Err(RotationError::NotPermitted {
                member_id: caller.clone(),
                action,
                rotation_id: self.id,
            })
        }
    }

    /// Append `member` to an open rotation
    pub fn add_member(&mut self, member: MemberId) -> RotationResult<()> {
        self.ensure_open()?;
        if self.has_member(&member) {
            return Err(RotationError::AlreadyJoined {
                member_id: member,
                rotation_id: self.id,
            });
        }
        self.members.push(member);
        Ok(())
    }

    /// Transition `Open → Started` with `assignments`
    ///
    /// Refuses a rotation that is no longer open, and an assignment that is
    /// not a derangement of the current member list (someone joined after the
    /// assignment was computed).
    pub fn finalize(
        &mut self,
        assignments: AssignmentSet,
        started_at: DateTime<Utc>,
    ) -> RotationResult<()> {
        self.ensure_open()?;
        assignments.verify(&self.members)?;

        self.status = RotationStatus::Started;
        self.assignments = Some(assignments);
        self.started_at = Some(started_at);
        Ok(())
    }

    /// Receiver assigned to `member`, once started
    pub fn receiver_of(&self, member: &MemberId) -> Option<&MemberId> {
        self.assignments.as_ref()?.receiver_of(member)
    }
}
