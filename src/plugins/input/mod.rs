//! Input plugin: keyboard and gamepad into simulation events.
//!
//! Two hops, same producer -> queue -> consumer shape as everywhere else:
//! - `gather_input` samples devices and writes `PlayerIntent` / `SwitchFireMode`
//!   messages. It never touches the simulation.
//! - `forward_input` reads those messages and pushes `Move` / `SwitchMode` events
//!   onto the simulation bus before the step drains it.
//!
//! Stick values are converted to the simulation's y-down frame here.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::simulation::SimSystems;
use crate::sim::entities::FireModeKind;
use crate::sim::events::{GameEvent, MoveEvent};
use crate::sim::world::Simulation;

/// Sampled stick intents for this frame, y-down.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
}

/// Raw mode index requested by the player. Out-of-range indices are dropped downstream.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchFireMode(pub usize);

const MOVE_KEYS: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyS, KeyCode::KeyA, KeyCode::KeyD];
const AIM_KEYS: [KeyCode; 4] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];
const MODE_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

pub fn plugin(app: &mut App) {
    app.add_message::<PlayerIntent>()
        .add_message::<SwitchFireMode>()
        .add_systems(
            Update,
            (gather_input, forward_input).chain().in_set(SimSystems::Input),
        );
}

/// `[up, down, left, right]` as a y-down axis.
fn key_axis(keys: &ButtonInput<KeyCode>, [up, down, left, right]: [KeyCode; 4]) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keys.pressed(up) {
        axis.y -= 1.0;
    }
    if keys.pressed(down) {
        axis.y += 1.0;
    }
    if keys.pressed(left) {
        axis.x -= 1.0;
    }
    if keys.pressed(right) {
        axis.x += 1.0;
    }
    axis
}

/// Zero below the dead-zone, otherwise unchanged.
fn dead_zone(stick: Vec2, threshold: f32) -> Vec2 {
    if stick.length() < threshold {
        Vec2::ZERO
    } else {
        stick
    }
}

/// Gamepad sticks report y-up.
#[inline]
fn flip_y(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    tunables: Res<Tunables>,
    mut intents: MessageWriter<PlayerIntent>,
    mut switches: MessageWriter<SwitchFireMode>,
) {
    let mut intent = PlayerIntent::default();

    if let Some(keys) = keys.as_deref() {
        intent.left_stick += key_axis(keys, MOVE_KEYS);
        intent.right_stick += key_axis(keys, AIM_KEYS);

        for (index, key) in MODE_KEYS.into_iter().enumerate() {
            if keys.just_pressed(key) {
                switches.write(SwitchFireMode(index));
            }
        }
    }

    for pad in &gamepads {
        intent.left_stick += flip_y(dead_zone(pad.left_stick(), tunables.stick_deadzone));
        intent.right_stick += flip_y(dead_zone(pad.right_stick(), tunables.stick_deadzone));
    }

    intent.left_stick = intent.left_stick.clamp_length_max(1.0);
    intent.right_stick = intent.right_stick.clamp_length_max(1.0);
    intents.write(intent);
}

fn forward_input(
    mut intents: MessageReader<PlayerIntent>,
    mut switches: MessageReader<SwitchFireMode>,
    mut sim: ResMut<Simulation>,
) {
    let world = sim.world_mut();

    for SwitchFireMode(index) in switches.read().copied() {
        let Some(mode) = FireModeKind::from_index(index) else {
            debug!("ignoring fire mode index {index}");
            continue;
        };
        if mode != world.player().mode() {
            info!("fire mode -> {mode:?}");
        }
        world.push_event(GameEvent::SwitchMode(mode));
    }

    // Intent is a level, not an edge: the latest sample wins.
    if let Some(intent) = intents.read().last() {
        world.push_event(GameEvent::Move(MoveEvent {
            left_stick: intent.left_stick,
            right_stick: intent.right_stick,
        }));
    }
}
