#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_loop::{desktop, init_logging, Config};

    let config = Config::default();
    init_logging(config.log_level);

    if let Err(e) = pollster::block_on(desktop::run(&config)) {
        log::error!("{:#}", anyhow::Error::from(e));
        std::process::exit(1);
    }
}

// the browser build starts from the library's wasm entry point
#[cfg(target_arch = "wasm32")]
fn main() {}
