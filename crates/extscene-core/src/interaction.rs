//! In-flight pointer gestures.

use crate::components::{Component, ComponentId, PointComponent, RectComponent};
use kurbo::{Point, Rect, Vec2};

/// Selection rectangle state for marquee selection.
#[derive(Debug, Clone)]
pub struct SelectionRect {
    /// Starting point in world coordinates.
    pub start: Point,
    /// Current point in world coordinates.
    pub current: Point,
}

impl SelectionRect {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Get the selection rectangle as a Rect.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// State of a drag moving one or more components.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Starting point of the drag, in world coordinates.
    pub start_point: Point,
    /// Current point of the drag, in world coordinates.
    pub current_point: Point,
    /// Components being moved and where they started.
    pub origins: Vec<(ComponentId, Point)>,
    /// Component to narrow the selection to if the press ends without moving.
    pub narrow_to: Option<ComponentId>,
}

impl DragState {
    pub fn new(start_point: Point, origins: Vec<(ComponentId, Point)>) -> Self {
        Self {
            start_point,
            current_point: start_point,
            origins,
            narrow_to: None,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// True once the pointer left the press position.
    pub fn has_moved(&self) -> bool {
        self.delta().hypot2() > 0.0
    }
}

/// A component being drawn with the mouse in edit mode.
#[derive(Debug, Clone)]
pub enum Drawing {
    Rect(RectComponent),
    Point(PointComponent),
}

impl Drawing {
    /// The component as it would currently be added.
    pub fn preview(&self) -> &(dyn Component + 'static) {
        match self {
            Drawing::Rect(rect) => rect,
            Drawing::Point(point) => point,
        }
    }
}

/// What the pointer is currently doing to the scene.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Left-dragging empty space moves the view.
    Panning,
    /// Left-dragging selected components.
    Dragging(DragState),
    /// Dragging the border of a component.
    Resizing(ComponentId),
    /// Right-dragging a selection rectangle.
    Marquee(SelectionRect),
    /// Right-dragging a new component in edit mode.
    Drawing(Drawing),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rect_normalizes() {
        let mut rect = SelectionRect::new(Point::new(100.0, 100.0));
        rect.current = Point::new(20.0, 150.0);
        assert_eq!(rect.to_rect(), Rect::new(20.0, 100.0, 100.0, 150.0));
    }

    #[test]
    fn test_drag_delta() {
        let mut drag = DragState::new(Point::new(10.0, 10.0), Vec::new());
        assert!(!drag.has_moved());
        drag.current_point = Point::new(15.0, 7.0);
        assert_eq!(drag.delta(), Vec2::new(5.0, -3.0));
        assert!(drag.has_moved());
    }

    #[test]
    fn test_drawing_preview() {
        let drawing = Drawing::Point(PointComponent::new(Point::new(3.0, 4.0), 5.0));
        assert_eq!(drawing.preview().position(), Point::new(3.0, 4.0));
        assert!(Interaction::default().is_idle());
    }
}
