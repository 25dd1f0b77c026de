//! Presentation plugin: mirrors the simulation's drawable list into sprites.
//!
//! Sprite entities are pooled by list index. Each frame the first `n` sprites are
//! rewritten from the `n` drawables and the rest are hidden, so steady-state
//! frames do no structural changes.
//!
//! ```text
//!   simulation (y-down, origin top-left)      scene (y-up, origin centre)
//!   (0, 0) ────────> x                               ^ y
//!     │                                              │
//!     v y                                  ──────────┼──────> x
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::VisualRegistry;
use crate::plugins::simulation::SimSystems;
use crate::sim::context::{Drawable, DrawableKind};
use crate::sim::world::Simulation;

/// Marker for sprites owned by the mirror.
#[derive(Component, Debug, Clone, Copy)]
pub struct DrawableSprite;

/// Mirror sprites in drawable-list order.
#[derive(Resource, Debug, Default)]
pub struct SpriteMirror {
    entities: Vec<Entity>,
}

impl SpriteMirror {
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SpriteMirror>();
    app.add_systems(Update, sync_sprites.in_set(SimSystems::Present));
}

/// Simulation point to scene point. `world_size` is the logical field size.
#[inline]
pub fn to_scene(p: Vec2, world_size: Vec2) -> Vec2 {
    Vec2::new(p.x - world_size.x * 0.5, world_size.y * 0.5 - p.y)
}

/// Flipping y mirrors angles.
#[inline]
pub fn scene_rotation(rotation: f32) -> Quat {
    Quat::from_rotation_z(-rotation)
}

fn depth(kind: DrawableKind) -> f32 {
    match kind {
        DrawableKind::Enemy => 1.0,
        DrawableKind::Bullet => 2.0,
        DrawableKind::PlayerBody => 3.0,
        DrawableKind::Reticle => 4.0,
    }
}

fn sprite_for(d: &Drawable, registry: &VisualRegistry) -> Sprite {
    let color = registry
        .style(d.visual)
        .map_or(Color::WHITE, |s| s.color_for_frame(d.frame));
    Sprite {
        color,
        custom_size: Some(Vec2::splat(d.size)),
        ..default()
    }
}

fn transform_for(d: &Drawable, world_size: Vec2) -> Transform {
    Transform::from_translation(to_scene(d.position, world_size).extend(depth(d.kind)))
        .with_rotation(scene_rotation(d.rotation))
}

fn sync_sprites(
    mut commands: Commands,
    sim: Res<Simulation>,
    registry: Res<VisualRegistry>,
    tunables: Res<Tunables>,
    mut mirror: ResMut<SpriteMirror>,
    mut q: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<DrawableSprite>>,
) {
    let drawables = sim.world().drawables();
    let world_size = tunables.world_size;

    for (i, d) in drawables.iter().enumerate() {
        let sprite = sprite_for(d, &registry);
        let transform = transform_for(d, world_size);

        if let Some(&e) = mirror.entities.get(i) {
            let Ok((mut s, mut tf, mut vis)) = q.get_mut(e) else {
                continue;
            };
            *s = sprite;
            *tf = transform;
            *vis = Visibility::Visible;
        } else {
            let e = commands
                .spawn((
                    Name::new(format!("Drawable{i}")),
                    DrawableSprite,
                    sprite,
                    transform,
                    Visibility::Visible,
                    DespawnOnExit(GameState::InGame),
                ))
                .id();
            mirror.entities.push(e);
        }
    }

    for &e in mirror.entities.iter().skip(drawables.len()) {
        if let Ok((_, _, mut vis)) = q.get_mut(e) {
            *vis = Visibility::Hidden;
        }
    }
}
