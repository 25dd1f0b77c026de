//! Event bus: a strict FIFO of value-typed game events.
//!
//! Producers (input, fire modes, the reaper, the spawner) only enqueue *intent*.
//! The world is the single consumer that turns intent into pool mutations.
//!
//! # Drain semantics
//! `drain_all` keeps popping until the queue is empty, including events pushed by
//! the handler itself. It is not a snapshot: a chained effect queued mid-drain is
//! applied in the same pass, after everything that was already queued.
//!
//! Events own all their data. The only reference-like payload is a pool handle,
//! which the pool validates on use.

use std::collections::VecDeque;

use bevy::math::Vec2;

use crate::sim::entities::FireModeKind;
use crate::sim::kinematics::{Behaviour, BehaviourKind};
use crate::sim::pool::SlotId;
use crate::sim::visuals::{VisualCatalog, VisualId};

/// Raw stick intents from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveEvent {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
}

/// A bullet the world should acquire from its pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireEvent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub visual: VisualId,
    pub size: f32,
    pub lifetime: f32,
    pub behaviour: Behaviour,
}

impl FireEvent {
    pub const DEFAULT_SIZE: f32 = 10.0;
}

/// An enemy the world should acquire from its pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnEvent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub visual: VisualId,
    pub size: f32,
    pub health: f32,
    pub behaviour: Behaviour,
    pub frame_count: u32,
    pub frame_interval: u32,
}

impl SpawnEvent {
    pub const DEFAULT_SIZE: f32 = 90.0;
    pub const DEFAULT_HEALTH: f32 = 10.0;

    /// Enemy archetype keyed by behaviour: speed and animation come from the kind.
    pub fn enemy(kind: BehaviourKind, position: Vec2, direction: Vec2, visuals: &VisualCatalog) -> Self {
        let dir = direction.try_normalize().unwrap_or(Vec2::ZERO);
        Self {
            position,
            velocity: dir * kind.speed(),
            visual: visuals.enemy(kind),
            size: Self::DEFAULT_SIZE,
            health: Self::DEFAULT_HEALTH,
            behaviour: Behaviour::from_kind(kind),
            frame_count: kind.frame_count(),
            frame_interval: kind.frame_interval(),
        }
    }
}

/// Which pool a handle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityHandle {
    Bullet(SlotId),
    Enemy(SlotId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Move(MoveEvent),
    SwitchMode(FireModeKind),
    Fire(FireEvent),
    Spawn(SpawnEvent),
    Release(EntityHandle),
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.queue.iter()
    }

    /// Pop and dispatch until empty. The handler may push follow-up events.
    ///
    /// Returns how many events were handled.
    pub fn drain_all(&mut self, mut handler: impl FnMut(GameEvent, &mut EventBus)) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            handler(event, self);
            handled += 1;
        }
        handled
    }
}

impl Extend<GameEvent> for EventBus {
    fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}
