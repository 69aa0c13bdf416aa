use std::{cell::RefCell, rc::Rc};

use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};

use crate::{
    bootstrap::{bootstrap, claim_client_slot},
    config::Config,
    demo::ClearClient,
    error::BootstrapError,
    render_loop::FrameScheduler,
    resize::{CanvasResizer, SharedSize, Viewport},
    time::InstantClock,
};

impl Viewport for Window {
    fn viewport_size(&self) -> (u32, u32) {
        let size = self.inner_size();
        (size.width, size.height)
    }
}

/// Queues frame callbacks and runs them on the window's next `RedrawRequested`.
pub struct RedrawScheduler {
    window: Rc<Window>,
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl RedrawScheduler {
    pub fn new(window: Rc<Window>) -> Self {
        Self {
            window,
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Runs the callbacks queued so far. Callbacks queued while running wait for
    /// the next redraw.
    pub fn run_pending(&self) {
        let callbacks = std::mem::take(&mut *self.pending.borrow_mut());
        for callback in callbacks {
            callback();
        }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), BootstrapError> {
        self.pending.borrow_mut().push(callback);
        self.window.request_redraw();
        Ok(())
    }
}

/// Runs the demo client in a native window. Only returns on a startup failure.
pub async fn run(config: &Config) -> Result<(), BootstrapError> {
    claim_client_slot()?;

    let event_loop = EventLoop::new();
    let (width, height) = config.window_size;
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .map_err(|e| BootstrapError::Window(e.to_string()))?;
    let window = Rc::new(window);

    let surface_size = SharedSize::default();
    let resizer = CanvasResizer::attach(window.clone(), surface_size.clone());

    let scheduler = Rc::new(RedrawScheduler::new(window.clone()));
    let driver = bootstrap(
        ClearClient::for_window(&window, surface_size),
        scheduler.clone(),
        Rc::new(InstantClock::new()),
    )
    .await?;

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            ref event,
            window_id,
        } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => {
                driver.stop();
                *control_flow = ControlFlow::Exit;
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                resizer.sync();
            }
            _ => {}
        },
        Event::RedrawRequested(window_id) if window_id == window.id() => {
            scheduler.run_pending();
        }
        _ => {}
    });
}
