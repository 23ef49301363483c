//! Viewport transform with pan, anchored zoom and smooth follow.
//!
//! Screen space has its origin at the top-left corner of the viewport with y
//! pointing down, and world space uses the same orientation:
//! `screen = (world - center) * zoom + viewport / 2`.

use glam::DVec2;
use stardust_core::{BodyId, FOLLOW_SMOOTHING, SimConfig};
use stardust_physics::{BodyStore, MergeOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World point drawn at the middle of the viewport
    pub center: DVec2,
    zoom: f64,
    zoom_min: f64,
    zoom_max: f64,
    /// Viewport size in screen pixels
    pub viewport: DVec2,
    follow: Option<BodyId>,
}

impl Camera {
    pub fn new(viewport: DVec2, zoom_min: f64, zoom_max: f64) -> Self {
        let (zoom_min, zoom_max) = if zoom_min <= zoom_max {
            (zoom_min, zoom_max)
        } else {
            (zoom_max, zoom_min)
        };
        Self {
            center: DVec2::ZERO,
            zoom: 1.0_f64.clamp(zoom_min, zoom_max),
            zoom_min,
            zoom_max,
            viewport,
            follow: None,
        }
    }

    pub fn from_config(config: &SimConfig, viewport: DVec2) -> Self {
        Self::new(viewport, config.zoom_min, config.zoom_max)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    pub fn following(&self) -> Option<BodyId> {
        self.follow
    }

    /// Back to the origin at 1x, following nothing
    pub fn reset(&mut self) {
        self.center = DVec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.zoom_min, self.zoom_max);
        self.follow = None;
    }

    /// Change the viewport size; the world point at the middle stays put
    pub fn resize(&mut self, viewport: DVec2) {
        if viewport.is_finite() && viewport.x > 0.0 && viewport.y > 0.0 {
            self.viewport = viewport;
        }
    }

    /// Drag the view by a screen-space delta. Dragging cancels follow.
    pub fn pan(&mut self, delta_screen: DVec2) {
        if !delta_screen.is_finite() {
            return;
        }
        self.follow = None;
        self.center -= delta_screen / self.zoom;
    }

    /// Multiply zoom by `factor` keeping the world point under `anchor` fixed.
    /// While following, the anchor is the viewport center.
    pub fn zoom_by(&mut self, factor: f64, anchor: DVec2) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor = if self.follow.is_some() || !anchor.is_finite() {
            self.viewport / 2.0
        } else {
            anchor
        };

        let before = self.screen_to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(self.zoom_min, self.zoom_max);
        let after = self.screen_to_world(anchor);
        self.center += before - after;
    }

    pub fn follow(&mut self, id: BodyId) {
        self.follow = Some(id);
    }

    pub fn unfollow(&mut self) {
        self.follow = None;
    }

    /// Move a fraction of the way toward the followed body. Drops the follow
    /// target if it no longer exists.
    pub fn update_follow(&mut self, store: &BodyStore) {
        let Some(id) = self.follow else {
            return;
        };
        match store.get(id) {
            Some(body) => self.center += (body.position - self.center) * FOLLOW_SMOOTHING,
            None => {
                log::debug!("Follow target {} is gone", id);
                self.follow = None;
            }
        }
    }

    /// Hand the follow target over to the survivor of a merge it took part in
    pub fn retarget(&mut self, outcomes: &[MergeOutcome]) {
        let Some(id) = self.follow else {
            return;
        };
        if let Some(o) = outcomes.iter().find(|o| o.absorbed.contains(&id)) {
            self.follow = Some(o.survivor);
        }
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        (world - self.center) * self.zoom + self.viewport / 2.0
    }

    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.viewport / 2.0) / self.zoom + self.center
    }

    /// Half-extent of the visible world rectangle, widened by `margin_px`
    pub fn visible_half_extent(&self, margin_px: f64) -> DVec2 {
        (self.viewport / 2.0 + DVec2::splat(margin_px)) / self.zoom
    }

    /// Body whose disk contains the clicked point, nearest center first
    pub fn closest_body_at(&self, store: &BodyStore, screen: DVec2) -> Option<BodyId> {
        let world = self.screen_to_world(screen);
        let mut best: Option<(f64, BodyId)> = None;
        for b in store.iter() {
            let d = b.position.distance(world);
            if d <= b.radius && best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, b.id));
            }
        }
        best.map(|(_, id)| id)
    }
}
