//! Pointer handling: picking bodies and driving the sidebar.
//!
//! Picking only resolves which bodies were hit; the game decides what each
//! hit does to the model.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use orrery_engine::*;

use crate::bodies::{BodyRegistry, BodyTag};

/// Close-button offset (px) while the sidebar is open.
pub const CLOSE_BUTTON_OPEN_OFFSET: f32 = 10.0;

/// Which hits of one click may change the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Every body along the ray, nearest first.
    #[default]
    AllHits,
    /// Only the nearest hit.
    NearestOnly,
}

/// Result of processing a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResult {
    /// Nothing was hit.
    None,
    /// At least one mesh was hit.
    Picked {
        /// Tag of the nearest hit; `None` for untagged meshes (overlay decoys).
        nearest: Option<BodyTag>,
        /// Tags to dispatch to the model, in hit order.
        tags: Vec<BodyTag>,
    },
}

/// Open/closed state of the info panel and what it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sidebar {
    open: bool,
    /// `None` shows the generic placeholder.
    content: Option<BodyTag>,
}

impl Sidebar {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the panel. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn show(&mut self, content: Option<BodyTag>) {
        self.content = content;
    }

    pub fn content(&self) -> Option<BodyTag> {
        self.content
    }

    pub fn close_button_offset(&self) -> f32 {
        if self.open {
            CLOSE_BUTTON_OPEN_OFFSET
        } else {
            0.0
        }
    }
}

/// Tracks the pointer and turns clicks into pick results.
pub struct InteractionSystem {
    pointer: Vec2,
    policy: DispatchPolicy,
}

impl InteractionSystem {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            pointer: Vec2::ZERO,
            policy,
        }
    }

    pub fn on_pointer_move(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// Cast a ray through the tracked pointer and resolve the hits.
    pub fn on_click(&self, ctx: &EngineContext, bodies: &BodyRegistry) -> InteractionResult {
        let ray = ctx.camera.ray_from_ndc(self.pointer);
        let hits = intersect_subtree(&ctx.scene, None, &ray);
        let Some(first) = hits.first() else {
            return InteractionResult::None;
        };
        let nearest = bodies.tag_of(first.node);
        log::debug!(
            "pick: {} hits, nearest {:?}",
            hits.len(),
            nearest.map(BodyTag::name)
        );

        let tags = match self.policy {
            DispatchPolicy::AllHits => hits.iter().filter_map(|h| bodies.tag_of(h.node)).collect(),
            DispatchPolicy::NearestOnly => nearest.into_iter().collect(),
        };
        InteractionResult::Picked { nearest, tags }
    }
}
