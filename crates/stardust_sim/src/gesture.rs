//! Tells a click apart from a drag for the primary pointer button.

use glam::DVec2;
use stardust_core::DRAG_THRESHOLD;

use crate::command::SimCommand;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerGesture {
    /// Where the button went down, None while released
    pressed_at: Option<DVec2>,
    last: DVec2,
    dragging: bool,
}

impl PointerGesture {
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self, at: DVec2) {
        self.pressed_at = Some(at);
        self.last = at;
        self.dragging = false;
    }

    /// Pointer moved while held. Once it strays past the drag threshold from
    /// the press point, every move becomes a pan.
    pub fn move_to(&mut self, at: DVec2) -> Option<SimCommand> {
        let start = self.pressed_at?;
        if !self.dragging {
            let moved = at - start;
            if moved.x.abs() <= DRAG_THRESHOLD && moved.y.abs() <= DRAG_THRESHOLD {
                return None;
            }
            self.dragging = true;
        }
        let delta = at - self.last;
        self.last = at;
        Some(SimCommand::Pan(delta))
    }

    /// Button released: a click when it never turned into a drag
    pub fn release(&mut self, at: DVec2) -> Option<SimCommand> {
        self.pressed_at.take()?;
        let was_drag = std::mem::take(&mut self.dragging);
        (!was_drag).then_some(SimCommand::Click(at))
    }

    /// Button released where the pointer was last seen, for when the window
    /// no longer reports a cursor position
    pub fn release_at_last(&mut self) -> Option<SimCommand> {
        let at = self.last;
        self.release(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_jitter_is_a_click() {
        let mut g = PointerGesture::default();
        g.press(DVec2::new(100.0, 100.0));
        assert_eq!(g.move_to(DVec2::new(101.0, 99.0)), None);
        assert_eq!(
            g.release(DVec2::new(101.0, 99.0)),
            Some(SimCommand::Click(DVec2::new(101.0, 99.0)))
        );
        assert!(!g.is_pressed());
    }

    #[test]
    fn test_drag_pans_from_press_point() {
        let mut g = PointerGesture::default();
        g.press(DVec2::new(100.0, 100.0));
        assert_eq!(
            g.move_to(DVec2::new(110.0, 100.0)),
            Some(SimCommand::Pan(DVec2::new(10.0, 0.0)))
        );
        assert_eq!(
            g.move_to(DVec2::new(111.0, 102.0)),
            Some(SimCommand::Pan(DVec2::new(1.0, 2.0)))
        );
        assert!(g.is_dragging());
        assert_eq!(g.release(DVec2::new(111.0, 102.0)), None);
    }

    #[test]
    fn test_moves_without_press_are_ignored() {
        let mut g = PointerGesture::default();
        assert_eq!(g.move_to(DVec2::new(50.0, 50.0)), None);
        assert_eq!(g.release(DVec2::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_release_without_cursor_ends_drag() {
        let mut g = PointerGesture::default();
        g.press(DVec2::new(100.0, 100.0));
        g.move_to(DVec2::new(150.0, 100.0));
        assert_eq!(g.release_at_last(), None);
        assert!(!g.is_pressed());
        assert!(!g.is_dragging());
    }

    #[test]
    fn test_release_without_cursor_clicks_at_press_point() {
        let mut g = PointerGesture::default();
        g.press(DVec2::new(40.0, 60.0));
        assert_eq!(
            g.release_at_last(),
            Some(SimCommand::Click(DVec2::new(40.0, 60.0)))
        );
        assert!(!g.is_pressed());
    }
}
