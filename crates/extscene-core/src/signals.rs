//! Notification lists the host subscribes to.
//!
//! Each event kind owns a [`Signal`]: an ordered list of callbacks invoked
//! synchronously, in registration order, on the thread delivering the input
//! event that caused them.

use crate::components::Component;
use crate::scene::SceneMode;
use kurbo::Point;

/// Handle returned by [`Signal::connect`], used to disconnect a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// An ordered list of callbacks for one event kind.
pub struct Signal<T: ?Sized> {
    handlers: Vec<(HandlerId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T: ?Sized> Default for Signal<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl<T: ?Sized> Signal<T> {
    /// Create a signal with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. It runs after every previously registered one.
    pub fn connect<F>(&mut self, callback: F) -> HandlerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Remove every callback.
    pub fn disconnect_all(&mut self) {
        self.handlers.clear();
    }

    /// Number of connected callbacks.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no callback is connected.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every callback with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.handlers {
            handler(value);
        }
    }
}

/// All notifications a scene emits.
#[derive(Debug, Default)]
pub struct SceneSignals {
    /// A component was pressed with the left button.
    pub component_left_clicked: Signal<dyn Component>,
    /// A component was pressed with the right button.
    pub component_right_clicked: Signal<dyn Component>,
    /// A component finished being dragged to a new position.
    pub component_moved: Signal<dyn Component>,
    /// A component left the scene. Fired just before it is dropped or handed back.
    pub component_deleted: Signal<dyn Component>,
    /// A component was drawn with the mouse in edit mode.
    pub component_created: Signal<dyn Component>,
    /// The edited group was put back together on leaving group editing.
    pub edited_group: Signal<dyn Component>,
    /// Left press on empty space, in world coordinates.
    pub left_clicked: Signal<Point>,
    /// Right press on empty space, in world coordinates.
    pub right_clicked: Signal<Point>,
    /// Middle press anywhere, in world coordinates.
    pub middle_clicked: Signal<Point>,
    /// Zoom level changed.
    pub zoom_changed: Signal<f64>,
    /// Scene mode changed.
    pub mode_changed: Signal<SceneMode>,
}
