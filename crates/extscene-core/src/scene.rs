//! The scene: an ordered collection of components over an optional
//! background, viewed through a pan/zoom camera.
//!
//! Hosts feed screen-space input through [`Scene::handle_pointer_event`] and
//! [`Scene::handle_key_event`] and subscribe to [`Scene::signals`]. Rendering
//! is left to the host: draw the background, then every component's
//! [`appearances`](crate::components::Component::appearances) in
//! [`Scene::components`] order, under [`Scene::transform`].

use crate::background::Background;
use crate::camera::Camera;
use crate::components::{Component, ComponentId, GroupComponent, PointComponent, RectComponent};
use crate::error::{SceneError, SceneResult};
use crate::input::{InputState, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::interaction::{DragState, Drawing, Interaction, SelectionRect};
use crate::options::SceneOptions;
use crate::signals::SceneSignals;
use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Radius of points dropped with Shift+right-click in edit mode.
pub const EDIT_POINT_RADIUS: f64 = 5.0;

/// How right-drags and border presses are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneMode {
    /// Select and drag; right-drag selects with a rectangle.
    #[default]
    Normal,
    /// Right-drag draws rectangles, Shift+right-click drops points, selected
    /// rectangles resize by their border.
    Edit,
    /// Edit the content of one group. Entering ungroups the selected
    /// [`GroupComponent`] (or starts a new one); leaving regroups what was
    /// edited. Only the group's members react to the pointer.
    EditGroup,
}

impl SceneMode {
    /// True in the modes where right-drags draw and borders resize.
    pub fn is_editing(self) -> bool {
        matches!(self, SceneMode::Edit | SceneMode::EditGroup)
    }
}

/// Inclusive overlap, so flat bounds touching the area count as inside.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// A pannable, zoomable canvas owning its components.
#[derive(Debug)]
pub struct Scene {
    /// Paint order: later components are drawn on top and hit first.
    components: Vec<Box<dyn Component>>,
    background: Option<Background>,
    camera: Camera,
    viewport_size: Size,
    options: SceneOptions,
    mode: SceneMode,
    input: InputState,
    interaction: Interaction,
    drag_allowed: bool,
    clipboard: Vec<Box<dyn Component>>,
    /// Components of the group being edited, while in `EditGroup` mode.
    group_members: Vec<ComponentId>,
    /// The group being edited, kept out of the scene until it is regrouped.
    edited_group: Option<GroupComponent>,
    /// Notifications the host can subscribe to.
    pub signals: SceneSignals,
}

impl Scene {
    /// Create an empty scene. Fails if the options are invalid.
    pub fn new(options: SceneOptions) -> SceneResult<Self> {
        options.validate()?;
        let camera = Camera::with_bounds(options.min_zoom, options.max_zoom)?;
        Ok(Self {
            components: Vec::new(),
            background: None,
            camera,
            viewport_size: options.viewport_size(),
            options,
            mode: SceneMode::Normal,
            input: InputState::new(),
            interaction: Interaction::Idle,
            drag_allowed: true,
            clipboard: Vec::new(),
            group_members: Vec::new(),
            edited_group: None,
            signals: SceneSignals::default(),
        })
    }

    /// Create a scene showing `background`.
    pub fn with_background(background: Background, options: SceneOptions) -> SceneResult<Self> {
        let mut scene = Self::new(options)?;
        scene.background = Some(background);
        Ok(scene)
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// World-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        self.camera.transform()
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Update the viewport size after the host window was resized.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// The world-space rectangle currently visible.
    pub fn visible_rect(&self) -> Rect {
        self.camera.visible_rect(self.viewport_size)
    }

    // --- Components ---

    /// Add a component, taking ownership of it.
    pub fn add<C: Component>(&mut self, component: C) -> SceneResult<ComponentId> {
        self.add_component(Box::new(component))
    }

    /// Add a boxed component on top of the others.
    ///
    /// Fails with [`SceneError::AlreadyMember`] if a component with the same
    /// id is already present.
    pub fn add_component(&mut self, mut component: Box<dyn Component>) -> SceneResult<ComponentId> {
        let id = component.id();
        if self.contains(id) {
            log::warn!("Rejected component {id}: already in the scene");
            return Err(SceneError::AlreadyMember(id));
        }
        component.update_scale(self.camera.zoom());
        self.components.push(component);
        log::debug!("Added component {id}");
        Ok(id)
    }

    /// Remove a component and hand it back, deselected.
    pub fn remove_component(&mut self, id: ComponentId) -> SceneResult<Box<dyn Component>> {
        let index = self.index_of(id)?;
        self.forget_interaction_for(id);
        self.group_members.retain(|member| *member != id);
        let mut component = self.components.remove(index);
        component.select(false);
        self.signals.component_deleted.emit(component.as_ref());
        log::debug!("Removed component {id}");
        Ok(component)
    }

    /// Remove every component, in paint order.
    pub fn remove_all(&mut self) -> Vec<Box<dyn Component>> {
        self.interaction = Interaction::Idle;
        self.group_members.clear();
        self.edited_group = None;
        let mut removed = std::mem::take(&mut self.components);
        for component in &mut removed {
            component.select(false);
            self.signals.component_deleted.emit(component.as_ref());
        }
        if !removed.is_empty() {
            log::debug!("Removed all {} components", removed.len());
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.iter().any(|c| c.id() == id)
    }

    pub fn component(&self, id: ComponentId) -> Option<&(dyn Component + 'static)> {
        self.components
            .iter()
            .find(|c| c.id() == id)
            .map(|c| &**c)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.components
            .iter_mut()
            .find(|c| c.id() == id)
            .map(|c| &mut **c)
    }

    /// All components in paint order.
    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.iter().map(|c| &**c)
    }

    /// All components of concrete type `T`, in paint order.
    pub fn components_of<T: Component>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|c| c.downcast_ref::<T>())
            .collect()
    }

    /// Topmost component under a world point.
    pub fn component_at(&self, world_point: Point) -> Option<ComponentId> {
        self.index_at(world_point).map(|index| self.components[index].id())
    }

    /// Union of every component's bounds and the background.
    pub fn content_bounds(&self) -> Option<Rect> {
        let background = self.background.as_ref().map(Background::bounds);
        self.components
            .iter()
            .map(|c| c.bounds())
            .chain(background)
            .reduce(|a, b| a.union(b))
    }

    fn index_of(&self, id: ComponentId) -> SceneResult<usize> {
        self.components
            .iter()
            .position(|c| c.id() == id)
            .ok_or(SceneError::NotMember(id))
    }

    fn index_at(&self, world_point: Point) -> Option<usize> {
        let tolerance = self.options.hit_tolerance / self.camera.zoom();
        self.components
            .iter()
            .rposition(|c| self.accepts_input(c.id()) && c.hit_test(world_point, tolerance))
    }

    /// In `EditGroup` mode only the edited group's members take pointer input.
    fn accepts_input(&self, id: ComponentId) -> bool {
        self.mode != SceneMode::EditGroup || self.group_members.contains(&id)
    }

    // --- Selection ---

    /// Selected components in paint order.
    pub fn selected_components(&self) -> Vec<&(dyn Component + 'static)> {
        self.components
            .iter()
            .filter(|c| c.is_selected())
            .map(|c| &**c)
            .collect()
    }

    /// Ids of the selected components in paint order.
    pub fn selected_ids(&self) -> Vec<ComponentId> {
        self.components
            .iter()
            .filter(|c| c.is_selected())
            .map(|c| c.id())
            .collect()
    }

    /// Select or deselect one component. Other selections are kept unless
    /// the component asks for unique selection.
    pub fn set_selected(&mut self, id: ComponentId, selected: bool) -> SceneResult<()> {
        let index = self.index_of(id)?;
        if selected {
            self.select_index(index, true);
        } else {
            self.components[index].select(false);
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for component in &mut self.components {
            component.select(false);
        }
    }

    /// Remove the selected components that are deletable.
    pub fn delete_selected(&mut self) -> Vec<ComponentId> {
        let ids: Vec<ComponentId> = self
            .components
            .iter()
            .filter(|c| c.is_selected() && c.flags().deletable)
            .map(|c| c.id())
            .collect();
        ids.into_iter()
            .filter(|&id| self.remove_component(id).is_ok())
            .collect()
    }

    /// Put copies of the selected components in the copy buffer.
    pub fn copy_selected(&mut self) -> usize {
        self.clipboard = self
            .components
            .iter()
            .filter(|c| c.is_selected())
            .map(|c| c.clone_component())
            .collect();
        log::debug!("Copied {} components", self.clipboard.len());
        self.clipboard.len()
    }

    /// True if `paste` has something to add.
    pub fn has_copied(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// Add copies of the copy buffer so its top-left lands at the pointer.
    /// The copies replace the current selection. Nothing is pasted while a
    /// gesture is in progress.
    ///
    /// In `EditGroup` mode the copies join the edited group; a pasted group
    /// is dissolved into its children.
    pub fn paste(&mut self) -> Vec<ComponentId> {
        if !self.interaction.is_idle() {
            log::debug!("Paste ignored during {:?}", self.interaction);
            return Vec::new();
        }
        let Some(top_left) = self
            .clipboard
            .iter()
            .map(|c| c.position())
            .reduce(|a, b| Point::new(a.x.min(b.x), a.y.min(b.y)))
        else {
            return Vec::new();
        };
        let target = self.camera.screen_to_world(self.input.pointer_position);

        let editing_group = self.mode == SceneMode::EditGroup;
        let copies: Vec<Box<dyn Component>> = self
            .clipboard
            .iter()
            .flat_map(|original| {
                let mut copy = original.clone_component();
                copy.set_position(target + (original.position() - top_left));
                if editing_group {
                    if let Some(group) = copy.downcast_mut::<GroupComponent>() {
                        return group.take_children();
                    }
                }
                vec![copy]
            })
            .collect();

        self.clear_selection();
        let mut ids = Vec::with_capacity(copies.len());
        for copy in copies {
            match self.add_component(copy) {
                Ok(id) => {
                    if let Some(added) = self.components.last_mut() {
                        added.select(true);
                    }
                    if editing_group {
                        self.group_members.push(id);
                    }
                    ids.push(id);
                }
                Err(err) => log::warn!("Paste skipped a component: {err}"),
            }
        }
        ids
    }

    /// Select the component at `index`, deselecting the others unless
    /// `additive` is set and the component allows shared selection.
    fn select_index(&mut self, index: usize, additive: bool) {
        let flags = self.components[index].flags();
        if !flags.selectable {
            return;
        }
        if !additive || flags.unique_selection {
            for (i, component) in self.components.iter_mut().enumerate() {
                if i != index {
                    component.select(false);
                }
            }
        }
        self.components[index].select(true);
    }

    /// Select what the marquee touches. A component asking for unique
    /// selection wins over the others; the topmost one if several are hit.
    fn select_in_rect(&mut self, area: Rect) {
        if area.width() <= 0.0 && area.height() <= 0.0 {
            return;
        }
        let hits: Vec<usize> = self
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                self.accepts_input(c.id()) && c.flags().selectable && overlaps(c.bounds(), area)
            })
            .map(|(index, _)| index)
            .collect();

        let unique = hits
            .iter()
            .rev()
            .copied()
            .find(|&index| self.components[index].flags().unique_selection);
        if let Some(index) = unique {
            self.select_index(index, false);
            return;
        }

        let additive = self.input.modifiers.command();
        for (index, component) in self.components.iter_mut().enumerate() {
            if hits.contains(&index) {
                component.select(true);
            } else if !additive {
                component.select(false);
            }
        }
    }

    // --- Viewport ---

    pub fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    /// Zoom around the viewport center. Returns true if the zoom changed.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let center = Point::new(self.viewport_size.width / 2.0, self.viewport_size.height / 2.0);
        let changed = self.camera.zoom_to(center, zoom);
        if changed {
            self.zoom_updated();
        }
        changed
    }

    /// Zoom by `factor`, keeping `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) -> bool {
        let changed = self.camera.zoom_at(screen_point, factor);
        if changed {
            self.zoom_updated();
        }
        changed
    }

    /// Change the zoom limits; the current zoom is clamped into them.
    pub fn set_zoom_bounds(&mut self, min_zoom: f64, max_zoom: f64) -> SceneResult<()> {
        let previous = self.camera.zoom();
        self.camera.set_zoom_bounds(min_zoom, max_zoom)?;
        self.options.min_zoom = min_zoom;
        self.options.max_zoom = max_zoom;
        self.after_camera_change(previous);
        Ok(())
    }

    /// Pan the view by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.camera.pan(delta);
    }

    /// Frame every component and the background in the viewport.
    /// An empty scene resets the view.
    pub fn fit_to_view(&mut self) {
        let previous = self.camera.zoom();
        match self.content_bounds() {
            Some(bounds) => {
                self.camera
                    .fit_to_bounds(bounds, self.viewport_size, self.options.fit_padding)
            }
            None => self.camera.reset(),
        }
        self.after_camera_change(previous);
    }

    /// Reset the view and scale it so the background fits `window`. The
    /// scale never drops below the minimum zoom.
    pub fn scale_to_window(&mut self, window: Size) -> SceneResult<()> {
        let background = self.background.as_ref().ok_or(SceneError::NoBackground)?;
        let image_size = background.size();
        let previous = self.camera.zoom();

        self.viewport_size = window;
        self.camera.reset();
        if image_size.width > 0.0 && image_size.height > 0.0 {
            let factor = (window.width / image_size.width)
                .min(window.height / image_size.height)
                .max(self.options.min_zoom);
            self.camera.zoom_to(Point::ZERO, factor);
        }
        self.after_camera_change(previous);
        Ok(())
    }

    fn after_camera_change(&mut self, previous_zoom: f64) {
        if (self.camera.zoom() - previous_zoom).abs() > f64::EPSILON {
            self.zoom_updated();
        }
    }

    fn zoom_updated(&mut self) {
        let zoom = self.camera.zoom();
        for component in &mut self.components {
            component.update_scale(zoom);
        }
        log::debug!("Zoom changed to {zoom:.3}");
        self.signals.zoom_changed.emit(&zoom);
    }

    // --- Background and lifecycle ---

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Set the background. A scene holds at most one; clear it first.
    pub fn set_background(&mut self, background: Background) -> SceneResult<()> {
        if self.background.is_some() {
            log::warn!("Rejected background: scene already has one");
            return Err(SceneError::BackgroundAlreadySet);
        }
        self.background = Some(background);
        Ok(())
    }

    /// Remove every component and the background, and reset the view.
    pub fn clear_scene(&mut self) {
        self.remove_all();
        self.background = None;
        let previous = self.camera.zoom();
        self.camera.reset();
        self.after_camera_change(previous);
        log::debug!("Scene cleared");
    }

    /// Enable or disable dragging components with the mouse.
    pub fn allow_drag(&mut self, allowed: bool) {
        self.drag_allowed = allowed;
        if !allowed && matches!(self.interaction, Interaction::Dragging(_)) {
            self.cancel_interaction();
        }
    }

    pub fn is_drag_allowed(&self) -> bool {
        self.drag_allowed
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Switch mode. Any gesture in progress is cancelled.
    ///
    /// Entering [`SceneMode::EditGroup`] with a single group selected puts
    /// its children back in the scene for editing. Leaving it gathers the
    /// edited components into that group (or a new one) and emits
    /// `edited_group`.
    pub fn set_mode(&mut self, mode: SceneMode) {
        if self.mode == mode {
            return;
        }
        self.cancel_interaction();
        if self.mode == SceneMode::EditGroup {
            self.close_edited_group();
        }
        self.mode = mode;
        if mode == SceneMode::EditGroup {
            self.open_edited_group();
        }
        log::debug!("Scene mode set to {mode:?}");
        self.signals.mode_changed.emit(&mode);
    }

    /// The group whose children are being edited, if any.
    pub fn edited_group(&self) -> Option<&GroupComponent> {
        self.edited_group.as_ref()
    }

    /// Members of the group being edited, in the order they joined.
    pub fn group_members(&self) -> &[ComponentId] {
        &self.group_members
    }

    fn open_edited_group(&mut self) {
        let selected = self.selected_ids();
        self.clear_selection();
        let &[id] = selected.as_slice() else {
            return;
        };
        let Ok(index) = self.index_of(id) else {
            return;
        };
        let Some(group) = self.components[index].downcast_mut::<GroupComponent>() else {
            return;
        };
        let mut group = std::mem::take(group);
        self.components.remove(index);

        for child in group.take_children() {
            match self.add_component(child) {
                Ok(child_id) => self.group_members.push(child_id),
                Err(err) => log::warn!("Could not ungroup a component: {err}"),
            }
        }
        log::debug!("Editing group {id} with {} components", self.group_members.len());
        self.edited_group = Some(group);
    }

    fn close_edited_group(&mut self) {
        let members = std::mem::take(&mut self.group_members);
        let edited = self.edited_group.take();
        let (children, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.components)
            .into_iter()
            .partition(|c| members.contains(&c.id()));
        self.components = rest;

        if children.is_empty() {
            if let Some(group) = edited {
                log::debug!("Dropped group {} left empty", group.id());
            }
            return;
        }
        let mut group = edited.unwrap_or_default();
        for child in children {
            group.add_child(child);
        }
        match self.add(group) {
            Ok(id) => {
                log::debug!("Regrouped {} components into {id}", members.len());
                if let Some(regrouped) = self.components.last() {
                    self.signals.edited_group.emit(regrouped.as_ref());
                }
            }
            Err(err) => log::warn!("Could not regroup edited components: {err}"),
        }
    }

    // --- Input ---

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// The marquee being dragged, in world coordinates.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match &self.interaction {
            Interaction::Marquee(marquee) => Some(marquee.to_rect()),
            _ => None,
        }
    }

    /// The component being drawn in edit mode, not yet part of the scene.
    pub fn drawing_preview(&self) -> Option<&(dyn Component + 'static)> {
        match &self.interaction {
            Interaction::Drawing(drawing) => Some(drawing.preview()),
            _ => None,
        }
    }

    /// Replace the modifier state, for hosts that report it with each event.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Route a pointer event given in screen coordinates.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.input.handle_pointer_event(&event);
        let world = self.camera.screen_to_world(event.position());
        match event {
            PointerEvent::Down { button, .. } => match button {
                MouseButton::Left => self.handle_left_press(world),
                MouseButton::Right => self.handle_right_press(world),
                MouseButton::Middle => self.signals.middle_clicked.emit(&world),
            },
            PointerEvent::Move { .. } => self.handle_pointer_move(world),
            PointerEvent::Up { button, .. } => match button {
                MouseButton::Left => self.handle_left_release(),
                MouseButton::Right => self.handle_right_release(world),
                MouseButton::Middle => {}
            },
            PointerEvent::Scroll { position, delta } => {
                let factor = 1.0 + delta.y * self.options.zoom_speed;
                if factor > 0.0 {
                    self.zoom_at(position, factor);
                }
            }
        }
    }

    /// Route a key event.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        self.input.handle_key_event(&event);
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        match key {
            Key::Delete | Key::Backspace => {
                self.delete_selected();
            }
            Key::Escape => {
                self.cancel_interaction();
                self.clear_selection();
            }
            Key::Character(c) if self.input.modifiers.command() => match c.to_ascii_lowercase() {
                'c' => {
                    self.copy_selected();
                }
                'v' => {
                    self.paste();
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Abort the gesture in progress. Dragged components go back to where
    /// the drag started; a drawing in progress is discarded.
    pub fn cancel_interaction(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Dragging(drag) => {
                for (id, origin) in drag.origins {
                    if let Some(component) = self.component_mut(id) {
                        component.set_position(origin);
                    }
                }
            }
            Interaction::Resizing(id) => {
                if let Some(component) = self.component_mut(id) {
                    component.end_resize();
                }
            }
            _ => {}
        }
    }

    fn handle_left_press(&mut self, world: Point) {
        if !self.interaction.is_idle() {
            return;
        }
        let Some(index) = self.index_at(world) else {
            self.signals.left_clicked.emit(&world);
            self.clear_selection();
            self.interaction = Interaction::Panning;
            return;
        };
        self.signals
            .component_left_clicked
            .emit(self.components[index].as_ref());

        let id = self.components[index].id();
        if self.mode.is_editing() && self.components[index].is_selected() {
            let border = self.options.hit_tolerance / self.camera.zoom();
            if self.components[index].begin_resize(world, border) {
                log::debug!("Resizing component {id}");
                self.interaction = Interaction::Resizing(id);
                return;
            }
        }

        let flags = self.components[index].flags();
        let additive = self.input.modifiers.command() && !flags.unique_selection;
        let was_selected = self.components[index].is_selected();
        let mut narrow_to = None;
        if !flags.selectable {
            if !additive {
                self.clear_selection();
            }
        } else if was_selected && additive {
            self.components[index].select(false);
            return;
        } else if was_selected {
            // Keep the group for dragging; a plain click narrows on release.
            narrow_to = Some(id);
        } else {
            self.select_index(index, additive);
        }

        if !self.drag_allowed || !flags.draggable {
            return;
        }
        let origins: Vec<(ComponentId, Point)> = if self.components[index].is_selected() {
            self.components
                .iter()
                .filter(|c| c.is_selected() && c.flags().draggable)
                .map(|c| (c.id(), c.position()))
                .collect()
        } else {
            vec![(id, self.components[index].position())]
        };
        let mut drag = DragState::new(world, origins);
        drag.narrow_to = narrow_to;
        self.interaction = Interaction::Dragging(drag);
    }

    fn handle_pointer_move(&mut self, world: Point) {
        match &mut self.interaction {
            Interaction::Idle => {}
            Interaction::Panning => self.camera.pan(self.input.pointer_delta()),
            Interaction::Dragging(drag) => {
                drag.current_point = world;
                let delta = drag.delta();
                for (id, origin) in &drag.origins {
                    if let Some(component) = self.components.iter_mut().find(|c| c.id() == *id) {
                        component.set_position(*origin + delta);
                    }
                }
            }
            Interaction::Resizing(id) => {
                if let Some(component) = self.components.iter_mut().find(|c| c.id() == *id) {
                    component.resize_to(world);
                }
            }
            Interaction::Marquee(marquee) => marquee.current = world,
            Interaction::Drawing(Drawing::Rect(rect)) => rect.resize_to(world),
            Interaction::Drawing(Drawing::Point(point)) => point.set_position(world),
        }
    }

    fn handle_left_release(&mut self) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Dragging(drag) => self.finish_drag(drag),
            Interaction::Resizing(id) => {
                if let Some(component) = self.component_mut(id) {
                    component.end_resize();
                }
                log::debug!("Finished resizing component {id}");
            }
            Interaction::Idle | Interaction::Panning => {}
            // Right-button gestures continue.
            other => self.interaction = other,
        }
    }

    fn finish_drag(&mut self, drag: DragState) {
        if drag.has_moved() {
            for (id, _) in &drag.origins {
                if let Some(component) = self.components.iter().find(|c| c.id() == *id) {
                    self.signals.component_moved.emit(component.as_ref());
                }
            }
            log::debug!("Moved {} components by {:?}", drag.origins.len(), drag.delta());
        } else if let Some(id) = drag.narrow_to {
            for component in &mut self.components {
                let keep = component.id() == id;
                component.select(keep);
            }
        }
    }

    fn handle_right_press(&mut self, world: Point) {
        if !self.interaction.is_idle() {
            return;
        }
        match self.index_at(world) {
            Some(index) => self
                .signals
                .component_right_clicked
                .emit(self.components[index].as_ref()),
            None => self.signals.right_clicked.emit(&world),
        }

        self.interaction = match self.mode {
            SceneMode::Normal => Interaction::Marquee(SelectionRect::new(world)),
            SceneMode::Edit | SceneMode::EditGroup if self.input.modifiers.shift => {
                Interaction::Drawing(Drawing::Point(PointComponent::new(world, EDIT_POINT_RADIUS)))
            }
            SceneMode::Edit | SceneMode::EditGroup => {
                let mut rect = RectComponent::new(world, 0.0, 0.0);
                rect.begin_drawing_from(world);
                Interaction::Drawing(Drawing::Rect(rect))
            }
        };
    }

    fn handle_right_release(&mut self, world: Point) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Marquee(mut marquee) => {
                marquee.current = world;
                self.select_in_rect(marquee.to_rect());
            }
            Interaction::Drawing(Drawing::Rect(mut rect)) => {
                rect.resize_to(world);
                rect.end_resize();
                if rect.is_big_enough() {
                    self.insert_created(Box::new(rect));
                } else {
                    log::debug!("Discarded rectangle smaller than {}", RectComponent::MIN_SIZE);
                }
            }
            Interaction::Drawing(Drawing::Point(mut point)) => {
                point.set_position(world);
                self.insert_created(Box::new(point));
            }
            other => self.interaction = other,
        }
    }

    fn insert_created(&mut self, component: Box<dyn Component>) {
        match self.add_component(component) {
            Ok(id) => {
                if self.mode == SceneMode::EditGroup {
                    self.group_members.push(id);
                }
                if let Some(created) = self.components.last() {
                    self.signals.component_created.emit(created.as_ref());
                }
            }
            Err(err) => log::warn!("Could not add drawn component: {err}"),
        }
    }

    /// Drop references to a component that is leaving the scene.
    fn forget_interaction_for(&mut self, id: ComponentId) {
        let stale = match &mut self.interaction {
            Interaction::Dragging(drag) => {
                drag.origins.retain(|(origin_id, _)| *origin_id != id);
                if drag.narrow_to == Some(id) {
                    drag.narrow_to = None;
                }
                drag.origins.is_empty()
            }
            Interaction::Resizing(resized) => *resized == id,
            _ => false,
        };
        if stale {
            self.interaction = Interaction::Idle;
        }
    }
}
