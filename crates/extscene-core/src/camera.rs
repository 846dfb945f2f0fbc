//! Camera module for pan/zoom transforms.

use crate::error::ConfigError;
use crate::options::validate_zoom_bounds;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform of a scene.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates. The zoom
/// level is always kept within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    zoom: f64,
    /// Minimum allowed zoom level.
    min_zoom: f64,
    /// Maximum allowed zoom level.
    max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with the given zoom bounds.
    pub fn with_bounds(min_zoom: f64, max_zoom: f64) -> Result<Self, ConfigError> {
        let mut camera = Self::new();
        camera.set_zoom_bounds(min_zoom, max_zoom)?;
        Ok(camera)
    }

    /// Current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Configured zoom bounds as `(min, max)`.
    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Change the zoom bounds. The current zoom is re-clamped into them.
    pub fn set_zoom_bounds(&mut self, min_zoom: f64, max_zoom: f64) -> Result<(), ConfigError> {
        validate_zoom_bounds(min_zoom, max_zoom)?;
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        Ok(())
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// The world-space rectangle visible in a viewport of the given size.
    pub fn visible_rect(&self, viewport: Size) -> Rect {
        Rect::from_points(
            self.screen_to_world(Point::ZERO),
            self.screen_to_world(Point::new(viewport.width, viewport.height)),
        )
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    ///
    /// Returns true if the zoom level changed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        self.zoom_to(screen_point, self.zoom * factor)
    }

    /// Set an absolute zoom level, keeping the given screen point fixed.
    ///
    /// Returns true if the zoom level changed.
    pub fn zoom_to(&mut self, screen_point: Point, zoom: f64) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }

        // Convert screen point to world before zoom
        let world_point = self.screen_to_world(screen_point);

        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
        true
    }

    /// Reset camera to no offset and the zoom closest to 100%.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }

    /// Fit the camera to show the given bounding box.
    ///
    /// Flat bounds are fitted along their one non-empty axis. A single point
    /// is centered at the current zoom level.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = (bounds.width() > f64::EPSILON).then(|| padded_viewport.width / bounds.width());
        let scale_y =
            (bounds.height() > f64::EPSILON).then(|| padded_viewport.height / bounds.height());
        let fitted = match (scale_x, scale_y) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (Some(scale), None) | (None, Some(scale)) => Some(scale),
            (None, None) => None,
        };
        if let Some(zoom) = fitted {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }

        // Center the bounds in the viewport
        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);

        self.offset = Vec2::new(
            viewport_center.x - bounds_center.x * self.zoom,
            viewport_center.y - bounds_center.y * self.zoom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset(), Vec2::ZERO);
        assert!((camera.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(50.0, 100.0));
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom_to(Point::ZERO, 2.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(30.0, -20.0));
        camera.zoom_to(Point::new(10.0, 10.0), 1.5);

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001); // Try to zoom way out
        assert!((camera.zoom() - 0.1).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1000.0); // Try to zoom way in
        assert!((camera.zoom() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        let anchor = Point::new(200.0, 150.0);
        let world_before = camera.screen_to_world(anchor);
        assert!(camera.zoom_at(anchor, 1.25));
        let world_after = camera.screen_to_world(anchor);
        assert!((world_before.x - world_after.x).abs() < 1e-9);
        assert!((world_before.y - world_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_limit_reports_no_change() {
        let mut camera = Camera::with_bounds(0.5, 2.0).unwrap();
        assert!(camera.zoom_at(Point::ZERO, 4.0));
        assert!(!camera.zoom_at(Point::ZERO, 4.0));
        assert!(!camera.zoom_to(Point::ZERO, f64::NAN));
    }

    #[test]
    fn test_set_zoom_bounds_reclamps() {
        let mut camera = Camera::new();
        camera.zoom_to(Point::ZERO, 8.0);
        camera.set_zoom_bounds(0.5, 4.0).unwrap();
        assert!((camera.zoom() - 4.0).abs() < f64::EPSILON);

        assert!(camera.set_zoom_bounds(0.0, 4.0).is_err());
        assert!(camera.set_zoom_bounds(3.0, 1.0).is_err());
        assert_eq!(camera.zoom_bounds(), (0.5, 4.0));
    }

    #[test]
    fn test_fit_to_bounds_contains_content() {
        let mut camera = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        let bounds = Rect::new(-500.0, 100.0, 1500.0, 900.0);
        camera.fit_to_bounds(bounds, viewport, 20.0);

        let visible = camera.visible_rect(viewport);
        assert!(visible.contains(Point::new(bounds.x0, bounds.y0)));
        assert!(visible.contains(Point::new(bounds.x1, bounds.y1)));
    }

    #[test]
    fn test_fit_to_point_centers_it() {
        let mut camera = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        camera.fit_to_bounds(Rect::from_origin_size((40.0, 60.0), (0.0, 0.0)), viewport, 20.0);
        let screen = camera.world_to_screen(Point::new(40.0, 60.0));
        assert!((screen.x - 400.0).abs() < 1e-9);
        assert!((screen.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_flat_bounds_uses_long_axis() {
        let mut camera = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        let bounds = Rect::new(0.0, 0.0, 2000.0, 0.0);
        camera.fit_to_bounds(bounds, viewport, 20.0);

        assert!((camera.zoom() - 760.0 / 2000.0).abs() < 1e-12);
        let visible = camera.visible_rect(viewport);
        assert!(visible.contains(Point::new(bounds.x0, bounds.y0)));
        assert!(visible.contains(Point::new(bounds.x1, bounds.y1)));

        let mut camera = Camera::new();
        camera.fit_to_bounds(Rect::new(10.0, -1000.0, 10.0, 1000.0), viewport, 20.0);
        assert!((camera.zoom() - 560.0 / 2000.0).abs() < 1e-12);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset().x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset().y - 20.0).abs() < f64::EPSILON);
    }
}
