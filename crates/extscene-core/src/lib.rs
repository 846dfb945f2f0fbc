//! ExtScene Core Library
//!
//! A toolkit-agnostic scene of selectable, draggable and deletable components
//! over a pannable, zoomable background.

pub mod background;
pub mod camera;
pub mod components;
pub mod error;
pub mod input;
pub mod interaction;
pub mod options;
pub mod scene;
pub mod signals;

pub use background::Background;
pub use camera::Camera;
pub use components::{
    Appearance, Component, ComponentBase, ComponentFlags, ComponentId, ComponentStyle,
    GroupComponent, PointComponent, RectComponent, ResizeHandle, Rgba,
};
pub use error::{ConfigError, SceneError, SceneResult};
pub use input::{InputState, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::Interaction;
pub use options::SceneOptions;
pub use scene::{Scene, SceneMode};
pub use signals::{HandlerId, SceneSignals, Signal};
