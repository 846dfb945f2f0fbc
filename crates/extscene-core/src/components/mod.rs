//! Components placed on a scene.
//!
//! A component is anything implementing [`Component`]. The trait carries the
//! shared capability set (selectable, draggable, deletable) through a
//! [`ComponentBase`] that every implementation embeds; shape-specific
//! geometry and appearance are supplied by the implementor.

mod group;
mod point;
mod rect;

pub use group::GroupComponent;
pub use point::PointComponent;
pub use rect::{RectComponent, ResizeHandle};

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;
use uuid::Uuid;

/// Unique identifier for components.
pub type ComponentId = Uuid;

/// Default outline color for the built-in components (cobalt blue).
pub const DEFAULT_PEN_COLOR: Rgba = Rgba::new(0x00, 0x47, 0xAB, 255);
/// Default outline width in screen pixels.
pub const DEFAULT_PEN_WIDTH: f64 = 2.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke and fill used to draw a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStyle {
    /// Outline color.
    pub stroke_color: Rgba,
    /// Outline width in screen pixels; it does not scale with zoom.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<Rgba>,
    /// Draw the outline dashed.
    pub dashed: bool,
}

impl Default for ComponentStyle {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_PEN_COLOR,
            stroke_width: DEFAULT_PEN_WIDTH,
            fill_color: None,
            dashed: false,
        }
    }
}

impl ComponentStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Same style with a fill.
    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.fill_color = Some(fill);
        self
    }
}

/// What a renderer needs to draw a component in its current state.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Outline in world coordinates.
    pub path: BezPath,
    /// Stroke and fill.
    pub style: ComponentStyle,
}

/// Capabilities of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFlags {
    /// Can be moved with the mouse.
    pub draggable: bool,
    /// Can be selected.
    pub selectable: bool,
    /// Can be removed with the delete key.
    pub deletable: bool,
    /// Selecting this component clears every other selection.
    pub unique_selection: bool,
}

impl Default for ComponentFlags {
    fn default() -> Self {
        Self {
            draggable: true,
            selectable: true,
            deletable: true,
            unique_selection: false,
        }
    }
}

impl ComponentFlags {
    pub fn new(draggable: bool, selectable: bool, deletable: bool) -> Self {
        Self {
            draggable,
            selectable,
            deletable,
            unique_selection: false,
        }
    }

    /// A component that only decorates the scene.
    pub fn fixed() -> Self {
        Self::new(false, false, false)
    }

    pub fn with_unique_selection(mut self, unique: bool) -> Self {
        self.unique_selection = unique;
        self
    }
}

/// State shared by every component: identity, position, flags, selection.
#[derive(Debug, Clone)]
pub struct ComponentBase {
    id: ComponentId,
    position: Point,
    flags: ComponentFlags,
    selected: bool,
}

impl ComponentBase {
    pub fn new(position: Point, flags: ComponentFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            flags,
            selected: false,
        }
    }

    /// Copy of this base with a fresh id, unselected.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: self.position,
            flags: self.flags,
            selected: false,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn flags(&self) -> ComponentFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ComponentFlags) {
        self.flags = flags;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Store the selection flag. Returns true if it changed.
    fn store_selected(&mut self, selected: bool) -> bool {
        let changed = self.selected != selected;
        self.selected = selected;
        changed
    }
}

/// Common trait for everything that can live on a scene.
///
/// Implementors embed a [`ComponentBase`] and expose it through `base` and
/// `base_mut`; identity, position and selection come for free. Appearance
/// must be a pure function of the component's state so the selected flag and
/// what gets drawn can never disagree.
pub trait Component: Any + std::fmt::Debug {
    /// Shared component state.
    fn base(&self) -> &ComponentBase;

    /// Mutable shared component state.
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Current rendered state.
    fn appearance(&self) -> Appearance;

    /// Everything to draw for this component, back to front. Composite
    /// components return their parts.
    fn appearances(&self) -> Vec<Appearance> {
        vec![self.appearance()]
    }

    /// Fresh, unselected copy with a new id.
    fn clone_component(&self) -> Box<dyn Component>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Called after the selection flag changed, before `select` returns.
    fn on_selection_changed(&mut self, _selected: bool) {}

    /// Check if a point (in world coordinates) hits this component.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Host-defined description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Called whenever the scene zoom changes.
    fn update_scale(&mut self, _zoom: f64) {}

    /// Try to start a border resize at `point`. Returns false if the point
    /// is not on a resize handle or the component cannot be resized.
    fn begin_resize(&mut self, _point: Point, _tolerance: f64) -> bool {
        false
    }

    /// Resize so the grabbed border follows `point`.
    fn resize_to(&mut self, _point: Point) {}

    /// Finish the current resize.
    fn end_resize(&mut self) {}

    fn id(&self) -> ComponentId {
        self.base().id()
    }

    fn flags(&self) -> ComponentFlags {
        self.base().flags()
    }

    fn position(&self) -> Point {
        self.base().position()
    }

    fn set_position(&mut self, position: Point) {
        self.base_mut().set_position(position);
    }

    fn move_by(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    fn is_selected(&self) -> bool {
        self.base().is_selected()
    }

    /// Select or deselect. A no-op for components that are not selectable.
    fn select(&mut self, selected: bool) {
        if !self.flags().selectable {
            return;
        }
        if self.base_mut().store_selected(selected) {
            self.on_selection_changed(selected);
        }
    }
}

impl dyn Component {
    /// Downcast to a concrete component type.
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete component type, mutably.
    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Check the concrete type of a component.
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
