//! Battle log recorder and the duel segmentation view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::AttackEvent;

/// Log capacity used when the caller does not choose one.
pub const DEFAULT_MAX_LOGGED_EVENTS: usize = 50;

/// Append-only, capped buffer of [`AttackEvent`]s.
///
/// Past capacity, events are counted but not stored; the battle itself keeps
/// running.
#[derive(Debug, Clone)]
pub struct BattleLog {
    events: Vec<AttackEvent>,
    capacity: Option<usize>,
    next_sequence: u64,
    dropped: u64,
}

impl BattleLog {
    /// Creates an empty log. `None` means unbounded.
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            // The cap is caller-chosen; never preallocate more than the default.
            events: Vec::with_capacity(
                capacity.map_or(DEFAULT_MAX_LOGGED_EVENTS, |cap| {
                    cap.min(DEFAULT_MAX_LOGGED_EVENTS)
                }),
            ),
            capacity,
            next_sequence: 1,
            dropped: 0,
        }
    }

    /// Stamps the next sequence number on `event` and stores it if there is room.
    /// Returns `true` if the event was kept.
    pub fn record(&mut self, mut event: AttackEvent) -> bool {
        event.sequence = self.next_sequence;
        self.next_sequence += 1;
        if self.capacity.is_some_and(|cap| self.events.len() >= cap) {
            self.dropped += 1;
            return false;
        }
        self.events.push(event);
        true
    }

    /// Stored events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[AttackEvent] {
        &self.events
    }

    /// Events that arrived after the log was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Consumes the log, returning the stored events and the dropped count.
    #[must_use]
    pub fn into_parts(self) -> (Vec<AttackEvent>, u64) {
        (self.events, self.dropped)
    }
}

/// Unordered pair of creature ids, stored smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreaturePair {
    /// Smaller id.
    pub first: Uuid,
    /// Larger id.
    pub second: Uuid,
}

impl CreaturePair {
    /// Builds the pair regardless of argument order.
    #[must_use]
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Returns `true` if `id` is one of the two creatures.
    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.first == id || self.second == id
    }
}

/// A run of consecutive events between the same two creatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSegment {
    /// 1-based duel number.
    pub index: usize,
    /// The two creatures; `None` only for a segment made solely of status ticks.
    pub pair: Option<CreaturePair>,
    /// Events in log order.
    pub events: Vec<AttackEvent>,
}

/// Splits a flat log into duels.
///
/// A new segment opens whenever the attacking pair changes. Status ticks
/// carry no pair and join the open segment; a tick that arrives before any
/// attack opens a segment that takes the pair of the next attack.
/// Concatenating the segments' events yields the input unchanged.
#[must_use]
pub fn segment_by_duel(events: &[AttackEvent]) -> Vec<DuelSegment> {
    let mut segments: Vec<DuelSegment> = Vec::new();

    for event in events {
        let pair = event
            .creature_pair()
            .map(|(a, b)| CreaturePair::new(a, b));

        let joins_open = segments.last().is_some_and(|open| match (open.pair, pair) {
            (_, None) | (None, Some(_)) => true,
            (Some(current), Some(incoming)) => current == incoming,
        });

        if joins_open {
            if let Some(open) = segments.last_mut() {
                if open.pair.is_none() {
                    open.pair = pair;
                }
                open.events.push(event.clone());
            }
        } else {
            segments.push(DuelSegment {
                index: segments.len() + 1,
                pair,
                events: vec![event.clone()],
            });
        }
    }

    segments
}
