//! Core plugin: shared resources and global settings.
//!
//! Also owns the visual registry: the only place that knows what a `VisualId`
//! looks like. The simulation sees ids only, through the `VisualCatalog` built here.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::sim::visuals::{VisualCatalog, VisualId};

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(VisualRegistry::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}

/// How one visual handle is drawn. Asset-free: a tinted quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualStyle {
    pub color: Color,
    /// Brightness added per animation frame, so sheet frames stay distinguishable.
    pub frame_tint: f32,
}

impl VisualStyle {
    pub const fn solid(color: Color) -> Self {
        Self { color, frame_tint: 0.0 }
    }

    pub fn color_for_frame(&self, frame: u32) -> Color {
        if self.frame_tint == 0.0 || frame == 0 {
            return self.color;
        }
        let lift = self.frame_tint * frame as f32;
        let mut c = self.color.to_srgba();
        c.red = (c.red + lift).min(1.0);
        c.green = (c.green + lift).min(1.0);
        c.blue = (c.blue + lift).min(1.0);
        c.into()
    }
}

/// Explicit `VisualId -> VisualStyle` table.
#[derive(Resource, Debug, Clone)]
pub struct VisualRegistry {
    styles: Vec<VisualStyle>,
    catalog: VisualCatalog,
}

impl Default for VisualRegistry {
    fn default() -> Self {
        let mut styles = Vec::new();
        let mut register = |style| {
            styles.push(style);
            VisualId(styles.len() as u32 - 1)
        };

        let catalog = VisualCatalog {
            player: register(VisualStyle::solid(Color::srgb(0.2, 0.75, 0.9))),
            reticle: register(VisualStyle::solid(Color::srgba(0.9, 0.9, 0.9, 0.6))),
            bullet: register(VisualStyle::solid(Color::srgb(1.0, 0.85, 0.3))),
            dasher: register(VisualStyle {
                color: Color::srgb(0.9, 0.25, 0.25),
                frame_tint: 0.15,
            }),
            chaser: register(VisualStyle {
                color: Color::srgb(0.55, 0.3, 0.85),
                frame_tint: 0.08,
            }),
        };

        Self { styles, catalog }
    }
}

impl VisualRegistry {
    /// Add a style and return its freshly issued id.
    pub fn register(&mut self, style: VisualStyle) -> VisualId {
        self.styles.push(style);
        VisualId(self.styles.len() as u32 - 1)
    }

    pub fn style(&self, id: VisualId) -> Option<&VisualStyle> {
        self.styles.get(id.0 as usize)
    }

    /// Ids the simulation should stamp on what it spawns.
    #[inline]
    pub fn catalog(&self) -> VisualCatalog {
        self.catalog
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
