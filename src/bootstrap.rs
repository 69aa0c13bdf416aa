use std::{
    future::Future,
    rc::Rc,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    client::Client,
    error::BootstrapError,
    render_loop::{FrameDriver, FrameScheduler, RenderLoop},
    time::TimeSource,
};

static CLIENT_LAUNCHED: AtomicBool = AtomicBool::new(false);

/// Claims the single client slot of this process. Hosts call this before building
/// their client.
pub fn claim_client_slot() -> Result<(), BootstrapError> {
    if CLIENT_LAUNCHED.swap(true, Ordering::SeqCst) {
        return Err(BootstrapError::AlreadyLaunched);
    }
    Ok(())
}

/// Waits for `init` to produce the client, starts it and schedules the first frame.
///
/// Nothing is scheduled when `init` or the client's `start` fails.
pub async fn bootstrap<C, F, S, T>(
    init: F,
    scheduler: Rc<S>,
    time: Rc<T>,
) -> Result<FrameDriver<C, S, T>, BootstrapError>
where
    C: Client + 'static,
    F: Future<Output = anyhow::Result<C>>,
    S: FrameScheduler + 'static,
    T: TimeSource + 'static,
{
    let client = init.await.map_err(BootstrapError::Init)?;
    log::debug!("client initialized");

    let driver = FrameDriver::new(RenderLoop::new(client), scheduler, time);
    driver.start()?;
    Ok(driver)
}
