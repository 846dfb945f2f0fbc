//! Headless demo: builds a scene with two described markers and replays a
//! short pointer session against it, logging what the callbacks see.
//!
//! Usage: `RUST_LOG=info extscene-demo [background-image]`

use extscene_core::{
    Background, Component, ComponentStyle, Key, KeyEvent, MouseButton, PointComponent,
    PointerEvent, Rgba, Scene, SceneOptions, SceneResult,
};
use kurbo::{Point, Size, Vec2};

const NORMAL_SIZE: f64 = 10.0;

fn marker(x: f64, y: f64, description: &str) -> PointComponent {
    let style = ComponentStyle::default().with_fill(Rgba::from_hex(0xFFFF00));
    PointComponent::new(Point::new(x, y), NORMAL_SIZE)
        .with_style(style)
        .with_description(description)
}

fn describe(component: &dyn Component) -> &str {
    component.description().unwrap_or("<unnamed>")
}

fn connect_callbacks(scene: &mut Scene) {
    scene.signals.component_left_clicked.connect(|c| {
        if c.is::<PointComponent>() {
            log::info!("Left click on '{}'", describe(c));
        }
    });
    scene.signals.component_right_clicked.connect(|c| {
        log::info!("Right click on '{}'", describe(c));
    });
    scene.signals.component_moved.connect(|c| {
        let position = c.position();
        log::info!("Move '{}' to ({:.0}, {:.0})", describe(c), position.x, position.y);
    });
    scene.signals.component_deleted.connect(|c| {
        log::info!("Deleted '{}'", describe(c));
    });
    scene.signals.left_clicked.connect(|p| {
        log::info!("Left click on empty space at ({:.0}, {:.0})", p.x, p.y);
    });
    scene.signals.zoom_changed.connect(|zoom| {
        log::info!("Zoom is now {:.0}%", zoom * 100.0);
    });
}

fn run() -> SceneResult<()> {
    let mut scene = Scene::new(SceneOptions::default())?;
    if let Some(path) = std::env::args().nth(1) {
        scene.set_background(Background::open(path)?)?;
        scene.scale_to_window(Size::new(800.0, 600.0))?;
    }
    connect_callbacks(&mut scene);

    scene.add(marker(500.0, 400.0, "My component 1"))?;
    scene.add(marker(100.0, 200.0, "My component 2"))?;
    scene.fit_to_view();
    log::info!("Scene holds {} components", scene.len());

    // Script in world coordinates, mapped through the fitted camera.
    let camera = scene.camera().clone();
    let screen = |x: f64, y: f64| camera.world_to_screen(Point::new(x, y));
    let events = [
        PointerEvent::Down { position: screen(100.0, 200.0), button: MouseButton::Left },
        PointerEvent::Move { position: screen(150.0, 260.0) },
        PointerEvent::Up { position: screen(150.0, 260.0), button: MouseButton::Left },
        PointerEvent::Down { position: screen(500.0, 400.0), button: MouseButton::Right },
        PointerEvent::Up { position: screen(500.0, 400.0), button: MouseButton::Right },
        PointerEvent::Down { position: screen(500.0, 400.0), button: MouseButton::Left },
        PointerEvent::Up { position: screen(500.0, 400.0), button: MouseButton::Left },
        PointerEvent::Scroll { position: screen(300.0, 300.0), delta: Vec2::new(0.0, 120.0) },
    ];
    for event in events {
        scene.handle_pointer_event(event);
    }
    scene.handle_key_event(KeyEvent::Pressed(Key::Delete));

    for component in scene.components() {
        let position = component.position();
        log::info!(
            "Remaining: '{}' at ({:.0}, {:.0})",
            describe(component),
            position.x,
            position.y
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting ExtScene demo");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
