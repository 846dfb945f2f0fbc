//! Group component for combining multiple components.

use super::{Appearance, Component, ComponentBase, ComponentFlags, ComponentStyle, ComponentId};
use kurbo::{Point, Rect, Shape as KurboShape};
use std::any::Any;

/// A group of components that is selected and moved as a single unit.
///
/// Children keep world coordinates. The group's position is the top-left
/// corner of its bounds; moving the group moves every child by the same
/// delta. Groups can contain other groups.
#[derive(Debug)]
pub struct GroupComponent {
    base: ComponentBase,
    children: Vec<Box<dyn Component>>,
    description: Option<String>,
}

impl Default for GroupComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupComponent {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Point::ZERO, ComponentFlags::default()),
            children: Vec::new(),
            description: None,
        }
    }

    /// Create a group from a list of components.
    pub fn from_children(children: Vec<Box<dyn Component>>) -> Self {
        let mut group = Self::new();
        for child in children {
            group.add_child(child);
        }
        group
    }

    pub fn with_flags(mut self, flags: ComponentFlags) -> Self {
        self.base.set_flags(flags);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a child on top of the others. It is deselected first.
    pub fn add_child(&mut self, mut child: Box<dyn Component>) {
        child.select(false);
        self.children.push(child);
        self.sync_position();
    }

    /// Get the children of this group, in paint order.
    pub fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    /// Get a child by id (direct children only).
    pub fn child(&self, id: ComponentId) -> Option<&(dyn Component + 'static)> {
        self.children
            .iter()
            .find(|c| c.id() == id)
            .map(|c| &**c)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Dissolve the group's content and return its children. The group
    /// itself stays, empty.
    pub fn take_children(&mut self) -> Vec<Box<dyn Component>> {
        std::mem::take(&mut self.children)
    }

    fn sync_position(&mut self) {
        if !self.children.is_empty() {
            let origin = self.bounds().origin();
            self.base.set_position(origin);
        }
    }

    fn frame_style(&self) -> ComponentStyle {
        ComponentStyle {
            dashed: self.is_selected(),
            ..ComponentStyle::default()
        }
    }
}

impl Component for GroupComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(|c| c.bounds())
            .reduce(|a, b| a.union(b))
            .unwrap_or_else(|| Rect::from_origin_size(self.position(), (0.0, 0.0)))
    }

    /// The group's frame: its bounding box, dashed while selected.
    fn appearance(&self) -> Appearance {
        Appearance {
            path: self.bounds().to_path(0.1),
            style: self.frame_style(),
        }
    }

    fn appearances(&self) -> Vec<Appearance> {
        let mut parts: Vec<Appearance> = self.children.iter().flat_map(|c| c.appearances()).collect();
        if self.is_selected() {
            parts.push(self.appearance());
        }
        parts
    }

    fn clone_component(&self) -> Box<dyn Component> {
        Box::new(Self {
            base: self.base.duplicate(),
            children: self.children.iter().map(|c| c.clone_component()).collect(),
            description: self.description.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.children.iter().any(|c| c.hit_test(point, tolerance))
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn update_scale(&mut self, zoom: f64) {
        for child in &mut self.children {
            child.update_scale(zoom);
        }
    }

    fn set_position(&mut self, position: Point) {
        let delta = position - self.position();
        for child in &mut self.children {
            child.move_by(delta);
        }
        self.base.set_position(position);
    }
}
