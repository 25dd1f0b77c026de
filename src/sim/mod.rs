//! Simulation core: pooled entities, a FIFO event bus and the frame-stepped world.
//!
//! Nothing in here touches the Bevy ECS. Plugins in `crate::plugins` are the
//! collaborators: they push events in and read drawables out.
//!
//! # Data flow
//! ```text
//!   input plugin ── Move / SwitchMode ─┐
//!   spawner      ── Spawn ─────────────┤
//!                                      v
//!                               ┌────────────┐
//!   fire modes ── Fire ───────> │  EventBus  │ <── Release ── reaper
//!                               └─────┬──────┘
//!                                     │ drain (single consumer)
//!                                     v
//!                  ┌──────────────────────────────────────┐
//!                  │ SimWorld                             │
//!                  │   Player   Pool<Bullet>  Pool<Enemy> │
//!                  └─────────────────┬────────────────────┘
//!                                    │ publish
//!                                    v
//!                         Vec<Drawable> ──> presentation plugin
//! ```
//!
//! Coordinates are y-down screen units; `bounds` is the play field.

pub mod context;
pub mod entities;
pub mod events;
pub mod kinematics;
pub mod math;
pub mod pool;
pub mod visuals;
pub mod world;

pub use context::{Drawable, DrawableKind, WorldContext};
pub use events::{EntityHandle, EventBus, FireEvent, GameEvent, MoveEvent, SpawnEvent};
pub use visuals::{VisualCatalog, VisualId};
pub use world::{SimStats, SimWorld, Simulation};
