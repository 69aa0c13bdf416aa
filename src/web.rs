use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::HtmlCanvasElement;

use crate::{
    bootstrap::{bootstrap, claim_client_slot},
    config::Config,
    demo::ClearClient,
    error::BootstrapError,
    render_loop::FrameScheduler,
    resize::{CanvasResizer, DrawingSurface, Viewport},
    time::InstantClock,
};

impl Viewport for web_sys::Window {
    fn viewport_size(&self) -> (u32, u32) {
        let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or_default() as u32
        };
        (read(self.inner_width()), read(self.inner_height()))
    }
}

impl DrawingSurface for HtmlCanvasElement {
    fn surface_size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn set_surface_size(&self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }
}

/// Schedules frames with `window.requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), BootstrapError> {
        let closure = Closure::once_into_js(move |_timestamp: f64| callback());
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| BootstrapError::Schedule(format!("{e:?}")))?;
        Ok(())
    }
}

pub fn find_canvas(
    document: &web_sys::Document,
    id: &str,
) -> Result<HtmlCanvasElement, BootstrapError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| BootstrapError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| BootstrapError::NotACanvas(id.to_string()))
}

/// Resizes the canvas now and on every window `resize` event for the rest of the
/// page's life.
pub fn install_resizer(
    window: &web_sys::Window,
    canvas: HtmlCanvasElement,
) -> Result<(), BootstrapError> {
    let resizer = Rc::new(CanvasResizer::attach(window.clone(), canvas));

    let on_resize = Closure::<dyn FnMut()>::new(move || {
        resizer.sync();
    });
    window
        .add_event_listener_with_callback_and_bool(
            "resize",
            on_resize.as_ref().unchecked_ref(),
            false,
        )
        .map_err(|e| BootstrapError::Listener {
            event: "resize",
            reason: format!("{e:?}"),
        })?;
    on_resize.forget();

    Ok(())
}

/// Brings up the demo client on the page: canvas lookup, resizer, client init,
/// `start`, then the animation frame loop.
pub async fn launch(config: &Config) -> Result<(), BootstrapError> {
    claim_client_slot()?;

    let window = web_sys::window().ok_or(BootstrapError::NoWindow)?;
    let document = window.document().ok_or(BootstrapError::NoDocument)?;
    let canvas = find_canvas(&document, &config.canvas_id)?;

    install_resizer(&window, canvas.clone())?;

    let scheduler = Rc::new(AnimationFrameScheduler::new(window));
    // The frame callbacks keep the driver alive from here on
    let _driver = bootstrap(
        ClearClient::for_canvas(canvas),
        scheduler,
        Rc::new(InstantClock::new()),
    )
    .await?;

    log::info!("client running on #{}", config.canvas_id);
    Ok(())
}
