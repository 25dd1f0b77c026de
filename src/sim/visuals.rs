//! Opaque visual handles.
//!
//! The core never loads or owns assets. The application's visual registry hands
//! it a `VisualCatalog` of ids at construction, and the core copies those ids into
//! entities and drawables.

use crate::sim::kinematics::BehaviourKind;

/// Opaque texture/sprite-sheet handle, resolved by the render collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u32);

/// The visual handles the core needs, one per kind of thing it draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualCatalog {
    pub player: VisualId,
    pub reticle: VisualId,
    pub bullet: VisualId,
    pub dasher: VisualId,
    pub chaser: VisualId,
}

impl Default for VisualCatalog {
    fn default() -> Self {
        Self {
            player: VisualId(0),
            reticle: VisualId(1),
            bullet: VisualId(2),
            dasher: VisualId(3),
            chaser: VisualId(4),
        }
    }
}

impl VisualCatalog {
    #[inline]
    pub fn enemy(&self, kind: BehaviourKind) -> VisualId {
        match kind {
            BehaviourKind::Dasher => self.dasher,
            BehaviourKind::Chaser => self.chaser,
        }
    }
}
