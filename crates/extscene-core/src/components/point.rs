//! Point marker component.

use super::{Appearance, Component, ComponentBase, ComponentFlags, ComponentStyle};
use kurbo::{Circle, Point, Rect, Shape as KurboShape};
use std::any::Any;

/// A circular marker centered on its position that grows while selected.
#[derive(Debug, Clone)]
pub struct PointComponent {
    base: ComponentBase,
    /// Radius when not selected.
    pub radius: f64,
    /// Radius when selected.
    pub selected_radius: f64,
    /// Style properties.
    pub style: ComponentStyle,
    description: Option<String>,
}

impl PointComponent {
    /// Create a new point. The selected radius defaults to twice `radius`.
    pub fn new(position: Point, radius: f64) -> Self {
        Self {
            base: ComponentBase::new(position, ComponentFlags::default()),
            radius,
            selected_radius: radius * 2.0,
            style: ComponentStyle::default(),
            description: None,
        }
    }

    pub fn with_selected_radius(mut self, radius: f64) -> Self {
        self.selected_radius = radius;
        self
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

    /// Radius currently drawn.
    pub fn current_radius(&self) -> f64 {
        if self.is_selected() {
            self.selected_radius
        } else {
            self.radius
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.position(), self.current_radius())
    }
}

impl Component for PointComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn bounds(&self) -> Rect {
        let r = self.current_radius();
        let center = self.position();
        Rect::new(center.x - r, center.y - r, center.x + r, center.y + r)
    }

    fn appearance(&self) -> Appearance {
        Appearance {
            path: self.as_circle().to_path(0.1),
            style: self.style.clone(),
        }
    }

    fn clone_component(&self) -> Box<dyn Component> {
        let mut copy = self.clone();
        copy.base = self.base.duplicate();
        Box::new(copy)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        self.position().distance(point) <= self.current_radius() + half_sw + tolerance
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = PointComponent::new(Point::new(50.0, 50.0), 10.0);
        assert!((point.radius - 10.0).abs() < f64::EPSILON);
        assert!((point.selected_radius - 20.0).abs() < f64::EPSILON);
        assert_eq!(point.position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_selection_grows_point() {
        let mut point = PointComponent::new(Point::new(0.0, 0.0), 10.0);
        let normal = point.appearance();
        assert!((point.bounds().width() - 20.0).abs() < f64::EPSILON);

        point.select(true);
        assert!((point.bounds().width() - 40.0).abs() < f64::EPSILON);
        assert_ne!(point.appearance(), normal);

        point.select(false);
        assert_eq!(point.appearance(), normal);
    }

    #[test]
    fn test_hit_test_edge() {
        let point = PointComponent::new(Point::new(0.0, 0.0), 10.0);
        assert!(point.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(point.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!point.hit_test(Point::new(15.0, 0.0), 0.0));
        assert!(point.hit_test(Point::new(15.0, 0.0), 5.0));
    }

    #[test]
    fn test_non_selectable_point_keeps_size() {
        let mut point = PointComponent::new(Point::new(0.0, 0.0), 10.0)
            .with_flags(ComponentFlags::fixed());
        point.select(true);
        assert!(!point.is_selected());
        assert!((point.current_radius() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_description() {
        let point = PointComponent::new(Point::ZERO, 5.0).with_description("pin 1");
        assert_eq!(point.description(), Some("pin 1"));
        assert_eq!(PointComponent::new(Point::ZERO, 5.0).description(), None);
    }
}
