//! Rectangle component that can be drawn with the mouse and resized by its
//! border.

use super::{Appearance, Component, ComponentBase, ComponentFlags, ComponentStyle};
use kurbo::{Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Border or corner of a rectangle being dragged to resize it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

/// Coordinates that stay put while a rectangle is resized.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeAnchor {
    fixed_x: Option<f64>,
    fixed_y: Option<f64>,
}

/// A rectangle whose top-left corner is its position.
#[derive(Debug, Clone)]
pub struct RectComponent {
    base: ComponentBase,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ComponentStyle,
    description: Option<String>,
    resizing: Option<ResizeAnchor>,
}

impl RectComponent {
    /// Smallest width and height a drawn rectangle may have.
    pub const MIN_SIZE: f64 = 2.0;

    /// Share of a side that still counts as its corner.
    pub const DIAGONAL_PORTION: f64 = 0.05;

    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            base: ComponentBase::new(position, ComponentFlags::default()),
            width,
            height,
            style: ComponentStyle::default(),
            description: None,
            resizing: None,
        }
    }

    /// Create a rectangle from a kurbo Rect.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    pub fn with_style(mut self, style: ComponentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_flags(mut self, flags: ComponentFlags) -> Self {
        self.base.set_flags(flags);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position(), (self.width, self.height))
    }

    /// True if both sides reach [`Self::MIN_SIZE`].
    pub fn is_big_enough(&self) -> bool {
        self.width >= Self::MIN_SIZE && self.height >= Self::MIN_SIZE
    }

    /// True while a border is being dragged.
    pub fn is_resizing(&self) -> bool {
        self.resizing.is_some()
    }

    /// Check if a world point lies inside the rectangle.
    pub fn contains_point(&self, point: Point) -> bool {
        self.as_rect().contains(point)
    }

    /// Grow so `rect` lies entirely inside this rectangle.
    pub fn resize_to_include(&mut self, rect: Rect) {
        let current = self.as_rect();
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        if corners.iter().all(|&c| current.contains(c) || on_boundary(current, c)) {
            return;
        }
        let union = current.union(rect);
        self.set_position(union.origin());
        self.width = union.width();
        self.height = union.height();
    }

    /// Which resize handle, if any, lies under `point`.
    ///
    /// `border` is the half-width of the grab band around each side, in world
    /// units.
    pub fn handle_at(&self, point: Point, border: f64) -> Option<ResizeHandle> {
        let rect = self.as_rect();
        if !rect.inflate(border, border).contains(point) && !on_boundary(rect.inflate(border, border), point) {
            return None;
        }

        let near_left = (point.x - rect.x0).abs() <= border;
        let near_right = (point.x - rect.x1).abs() <= border;
        let near_top = (point.y - rect.y0).abs() <= border;
        let near_bottom = (point.y - rect.y1).abs() <= border;

        // Corner zones reach a little along each side.
        let corner_x = border.max(Self::DIAGONAL_PORTION * rect.width());
        let corner_y = border.max(Self::DIAGONAL_PORTION * rect.height());
        let by_left = (point.x - rect.x0).abs() <= corner_x;
        let by_right = (point.x - rect.x1).abs() <= corner_x;
        let by_top = (point.y - rect.y0).abs() <= corner_y;
        let by_bottom = (point.y - rect.y1).abs() <= corner_y;

        if (near_left && by_top) || (near_top && by_left) {
            Some(ResizeHandle::TopLeft)
        } else if (near_right && by_top) || (near_top && by_right) {
            Some(ResizeHandle::TopRight)
        } else if (near_right && by_bottom) || (near_bottom && by_right) {
            Some(ResizeHandle::BottomRight)
        } else if (near_left && by_bottom) || (near_bottom && by_left) {
            Some(ResizeHandle::BottomLeft)
        } else if near_left {
            Some(ResizeHandle::Left)
        } else if near_right {
            Some(ResizeHandle::Right)
        } else if near_top {
            Some(ResizeHandle::Top)
        } else if near_bottom {
            Some(ResizeHandle::Bottom)
        } else {
            None
        }
    }

    /// Start resizing by `handle`; the opposite side or corner stays fixed.
    pub fn begin_resize_with(&mut self, handle: ResizeHandle) {
        let rect = self.as_rect();
        let (fixed_x, fixed_y) = match handle {
            ResizeHandle::TopLeft => (Some(rect.x1), Some(rect.y1)),
            ResizeHandle::Top => (None, Some(rect.y1)),
            ResizeHandle::TopRight => (Some(rect.x0), Some(rect.y1)),
            ResizeHandle::Right => (Some(rect.x0), None),
            ResizeHandle::BottomRight => (Some(rect.x0), Some(rect.y0)),
            ResizeHandle::Bottom => (None, Some(rect.y0)),
            ResizeHandle::BottomLeft => (Some(rect.x1), Some(rect.y0)),
            ResizeHandle::Left => (Some(rect.x1), None),
        };
        self.resizing = Some(ResizeAnchor { fixed_x, fixed_y });
    }

    /// Start drawing: `corner` stays fixed and the opposite corner follows
    /// [`resize_to`](Component::resize_to).
    pub fn begin_drawing_from(&mut self, corner: Point) {
        self.set_position(corner);
        self.width = 0.0;
        self.height = 0.0;
        self.resizing = Some(ResizeAnchor {
            fixed_x: Some(corner.x),
            fixed_y: Some(corner.y),
        });
    }
}

/// Kurbo's `contains` excludes the right and bottom edges.
fn on_boundary(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

impl Component for RectComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn appearance(&self) -> Appearance {
        let style = ComponentStyle {
            dashed: self.is_selected(),
            ..self.style.clone()
        };
        Appearance {
            path: self.as_rect().to_path(0.1),
            style,
        }
    }

    fn clone_component(&self) -> Box<dyn Component> {
        let mut copy = self.clone();
        copy.base = self.base.duplicate();
        copy.resizing = None;
        Box::new(copy)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        on_boundary(self.as_rect().inflate(tolerance, tolerance), point)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn begin_resize(&mut self, point: Point, tolerance: f64) -> bool {
        match self.handle_at(point, tolerance) {
            Some(handle) => {
                self.begin_resize_with(handle);
                true
            }
            None => false,
        }
    }

    fn resize_to(&mut self, point: Point) {
        let Some(anchor) = self.resizing else { return };
        let mut position = self.position();
        if let Some(fx) = anchor.fixed_x {
            self.width = (point.x - fx).abs();
            position.x = point.x.min(fx);
        }
        if let Some(fy) = anchor.fixed_y {
            self.height = (point.y - fy).abs();
            position.y = point.y.min(fy);
        }
        self.set_position(position);
    }

    fn end_resize(&mut self) {
        self.resizing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let rect = RectComponent::new(Point::new(10.0, 20.0), 100.0, 50.0);
        let bounds = rect.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_rect_normalizes() {
        let rect = RectComponent::from_rect(Rect::new(100.0, 100.0, 50.0, 60.0));
        assert_eq!(rect.position(), Point::new(50.0, 60.0));
        assert!((rect.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selected_outline_is_dashed() {
        let mut rect = RectComponent::new(Point::ZERO, 10.0, 10.0);
        assert!(!rect.appearance().style.dashed);
        rect.select(true);
        assert!(rect.appearance().style.dashed);
        rect.select(false);
        assert!(!rect.appearance().style.dashed);
    }

    #[test]
    fn test_hit_test() {
        let rect = RectComponent::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(100.0, 100.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0));
    }

    #[test]
    fn test_handle_at() {
        let rect = RectComponent::new(Point::new(0.0, 0.0), 100.0, 50.0);
        assert_eq!(rect.handle_at(Point::new(-1.0, -1.0), 3.0), Some(ResizeHandle::TopLeft));
        assert_eq!(rect.handle_at(Point::new(50.0, -2.0), 3.0), Some(ResizeHandle::Top));
        assert_eq!(rect.handle_at(Point::new(101.0, 25.0), 3.0), Some(ResizeHandle::Right));
        assert_eq!(rect.handle_at(Point::new(99.0, 51.0), 3.0), Some(ResizeHandle::BottomRight));
        assert_eq!(rect.handle_at(Point::new(50.0, 52.0), 3.0), Some(ResizeHandle::Bottom));
        assert_eq!(rect.handle_at(Point::new(-2.0, 25.0), 3.0), Some(ResizeHandle::Left));
        assert_eq!(rect.handle_at(Point::new(50.0, 25.0), 3.0), None);
        assert_eq!(rect.handle_at(Point::new(200.0, 25.0), 3.0), None);
    }

    #[test]
    fn test_resize_right_keeps_left() {
        let mut rect = RectComponent::new(Point::new(10.0, 10.0), 100.0, 50.0);
        assert!(rect.begin_resize(Point::new(110.0, 35.0), 3.0));
        rect.resize_to(Point::new(160.0, 999.0));
        rect.end_resize();

        assert_eq!(rect.position(), Point::new(10.0, 10.0));
        assert!((rect.width - 150.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
        assert!(!rect.is_resizing());
    }

    #[test]
    fn test_resize_past_fixed_corner_flips() {
        let mut rect = RectComponent::new(Point::new(10.0, 10.0), 100.0, 50.0);
        rect.begin_resize_with(ResizeHandle::TopLeft);
        rect.resize_to(Point::new(130.0, 80.0));

        // Fixed corner was (110, 60); the pointer moved past it.
        assert_eq!(rect.position(), Point::new(110.0, 60.0));
        assert!((rect.width - 20.0).abs() < f64::EPSILON);
        assert!((rect.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_draw_from_corner() {
        let mut rect = RectComponent::new(Point::ZERO, 0.0, 0.0);
        rect.begin_drawing_from(Point::new(50.0, 50.0));
        assert!(!rect.is_big_enough());
        rect.resize_to(Point::new(20.0, 90.0));
        assert_eq!(rect.position(), Point::new(20.0, 50.0));
        assert!((rect.width - 30.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
        assert!(rect.is_big_enough());
    }

    #[test]
    fn test_resize_to_include() {
        let mut rect = RectComponent::new(Point::new(0.0, 0.0), 10.0, 10.0);
        rect.resize_to_include(Rect::new(2.0, 2.0, 8.0, 8.0));
        assert!((rect.width - 10.0).abs() < f64::EPSILON);

        rect.resize_to_include(Rect::new(-5.0, 5.0, 20.0, 30.0));
        assert_eq!(rect.position(), Point::new(-5.0, 0.0));
        assert!((rect.width - 25.0).abs() < f64::EPSILON);
        assert!((rect.height - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clone_drops_selection_and_resize() {
        let mut rect = RectComponent::new(Point::ZERO, 10.0, 10.0).with_description("zone");
        rect.select(true);
        rect.begin_resize_with(ResizeHandle::Right);
        let copy = rect.clone_component();
        let copy = copy.downcast_ref::<RectComponent>().unwrap();
        assert!(!copy.is_selected());
        assert!(!copy.is_resizing());
        assert_eq!(copy.description(), Some("zone"));
        assert_ne!(copy.id(), rect.id());
    }
}
