#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod render_loop;
pub mod resize;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub mod desktop;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bootstrap::{bootstrap, claim_client_slot};
pub use client::Client;
pub use config::Config;
pub use error::BootstrapError;
pub use render_loop::{FrameDriver, FrameScheduler, RenderLoop, Step};
pub use resize::{CanvasResizer, DrawingSurface, SharedSize, Viewport};
pub use time::{FrameClock, InstantClock, TimeSource};

/// Sets up the logger (and on the web, the panic hook). Safe to call more than once.
pub fn init_logging(level: log::Level) {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if console_log::init_with_level(level).is_err() {
                log::debug!("logger already initialized");
            }
        } else {
            if env_logger::builder()
                .filter_level(level.to_level_filter())
                .try_init()
                .is_err()
            {
                log::debug!("logger already initialized");
            }
        }
    }
}

/// Entry point of the wasm module: runs once the module is instantiated. A failure
/// rejects the module's start promise and no frame is ever scheduled.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn run() -> Result<(), JsError> {
    let config = Config::default();
    init_logging(config.log_level);
    web::launch(&config)
        .await
        .map_err(|e| JsError::new(&format!("{:#}", anyhow::Error::from(e))))
}
