//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Opaque identifier for a member of a rotation pool
///
/// Only equality is ever inspected; the string is whatever the chat
/// platform uses to identify a user.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of the guild (server) a rotation belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuildId(String);

impl GuildId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GuildId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for a rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RotationId(Uuid);

impl RotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> SharedResult<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| SharedError::InvalidId { input: s.to_string() })
    }
}

impl Default for RotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RotationId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Strategy used to compute the assignment when a rotation starts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Any derangement, drawn uniformly at random
    #[serde(alias = "auto")]
    Random,

    /// The derangement that repeats prior pairings the least
    #[serde(alias = "magic")]
    Optimal,
}

impl SelectionMode {
    /// Article used in announcements ("a random rotation", "an optimal rotation")
    pub fn article(&self) -> &'static str {
        match self {
            SelectionMode::Random => "a",
            SelectionMode::Optimal => "an",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Random => write!(f, "random"),
            SelectionMode::Optimal => write!(f, "optimal"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" | "auto" => Ok(SelectionMode::Random),
            "optimal" | "magic" => Ok(SelectionMode::Optimal),
            _ => Err(SharedError::InvalidSelectionMode { value: s.to_string() }),
        }
    }
}

/// A single sender→receiver edge of an assignment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentPair {
    pub sender: MemberId,
    pub receiver: MemberId,
}

impl AssignmentPair {
    pub fn new(sender: MemberId, receiver: MemberId) -> Self {
        Self { sender, receiver }
    }
}

impl fmt::Display for AssignmentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.sender, self.receiver)
    }
}

/// A complete assignment over a member pool
///
/// Valid sets are bijections with no self-pairs: every pool member sends
/// exactly once and receives exactly once. Use [`AssignmentSet::verify`] to
/// check a set against the pool it was computed for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSet {
    pairs: Vec<AssignmentPair>,
}

impl AssignmentSet {
    pub fn from_pairs(pairs: Vec<AssignmentPair>) -> Self {
        Self { pairs }
    }

    /// Pair each sender with the receiver at the same position
    pub fn zip(senders: &[MemberId], receivers: Vec<MemberId>) -> Self {
        let pairs = senders
            .iter()
            .cloned()
            .zip(receivers)
            .map(|(sender, receiver)| AssignmentPair::new(sender, receiver))
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[AssignmentPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignmentPair> {
        self.pairs.iter()
    }

    /// Receiver assigned to the given sender, if the sender is in the set
    pub fn receiver_of(&self, sender: &MemberId) -> Option<&MemberId> {
        self.pairs
            .iter()
            .find(|pair| &pair.sender == sender)
            .map(|pair| &pair.receiver)
    }

    /// Check that this set is a derangement of `pool`
    ///
    /// Reports the first violation found: wrong size, a self-pair, a member
    /// outside the pool, or a member sending or receiving twice.
    pub fn verify(&self, pool: &[MemberId]) -> SharedResult<()> {
        if self.pairs.len() != pool.len() {
            return Err(invalid(format!(
                "expected {} pairs, found {}",
                pool.len(),
                self.pairs.len()
            )));
        }

        let members: HashSet<&MemberId> = pool.iter().collect();
        let mut senders = HashSet::with_capacity(pool.len());
        let mut receivers = HashSet::with_capacity(pool.len());

        for pair in &self.pairs {
            if pair.sender == pair.receiver {
                return Err(invalid(format!("{} is assigned to themselves", pair.sender)));
            }
            if !members.contains(&pair.sender) {
                return Err(invalid(format!("sender {} is not in the pool", pair.sender)));
            }
            if !members.contains(&pair.receiver) {
                return Err(invalid(format!("receiver {} is not in the pool", pair.receiver)));
            }
            if !senders.insert(&pair.sender) {
                return Err(invalid(format!("{} sends more than once", pair.sender)));
            }
            if !receivers.insert(&pair.receiver) {
                return Err(invalid(format!("{} receives more than once", pair.receiver)));
            }
        }

        Ok(())
    }
}

fn invalid(reason: String) -> SharedError {
    SharedError::InvalidAssignment { reason }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a AssignmentPair;
    type IntoIter = std::slice::Iter<'a, AssignmentPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Occurrence counts of prior sender→receiver pairings
///
/// Built fresh for each selection from the persisted assignments of earlier
/// rotations. Pairs may mention members outside the current pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairingHistory {
    counts: HashMap<(MemberId, MemberId), u32>,
}

impl PairingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `sender → receiver`
    pub fn record(&mut self, sender: MemberId, receiver: MemberId) {
        *self.counts.entry((sender, receiver)).or_insert(0) += 1;
    }

    /// How many times `sender → receiver` occurred
    pub fn count(&self, sender: &MemberId, receiver: &MemberId) -> u32 {
        // Tuple keys need owned values for lookup
        self.counts
            .get(&(sender.clone(), receiver.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of recorded occurrences
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&count| u64::from(count)).sum()
    }

    /// Number of distinct pairs recorded
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &MemberId, u32)> + '_ {
        self.counts
            .iter()
            .map(|((sender, receiver), &count)| (sender, receiver, count))
    }
}

impl FromIterator<(MemberId, MemberId)> for PairingHistory {
    fn from_iter<I: IntoIterator<Item = (MemberId, MemberId)>>(iter: I) -> Self {
        let mut history = Self::new();
        for (sender, receiver) in iter {
            history.record(sender, receiver);
        }
        history
    }
}

impl FromIterator<AssignmentPair> for PairingHistory {
    fn from_iter<I: IntoIterator<Item = AssignmentPair>>(iter: I) -> Self {
        iter.into_iter()
            .map(|pair| (pair.sender, pair.receiver))
            .collect()
    }
}

/// Caller permission bitset as delivered by the chat platform
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Permissions(u64);

impl Permissions {
    pub const ADMINISTRATOR: u64 = 1 << 3;
    pub const MANAGE_GUILD: u64 = 1 << 5;

    pub fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Administrator or Manage-Guild both grant admin-equivalent rights
    pub fn is_admin(&self) -> bool {
        self.0 & (Self::ADMINISTRATOR | Self::MANAGE_GUILD) != 0
    }
}

impl FromStr for Permissions {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| SharedError::InvalidPermissions { value: s.to_string() })
    }
}
