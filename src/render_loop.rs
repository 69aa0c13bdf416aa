use std::{cell::RefCell, rc::Rc};

use crate::{
    client::Client,
    error::BootstrapError,
    time::{FrameClock, TimeSource},
};

/// What a single call to [`RenderLoop::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The client was updated by `dt` seconds and rendered.
    Ran { dt: f32 },
    /// The loop has not been started, nothing was called.
    Idle,
    /// The loop was stopped, nothing was called and nothing should be rescheduled.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Running,
    Stopped,
}

/// Owns a client and its frame clock.
pub struct RenderLoop<C: Client> {
    client: C,
    clock: FrameClock,
    phase: Phase,
}

impl<C: Client> RenderLoop<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            clock: FrameClock::new(),
            phase: Phase::Created,
        }
    }

    /// Starts the client and baselines the clock at `now_ms`. Only the first call
    /// reaches the client.
    pub fn start(&mut self, now_ms: f64) -> Result<(), BootstrapError> {
        if self.phase != Phase::Created {
            return Err(BootstrapError::AlreadyStarted);
        }
        self.client.start().map_err(BootstrapError::Start)?;
        self.clock.reset(now_ms);
        self.phase = Phase::Running;
        log::info!("render loop started");
        Ok(())
    }

    pub fn step(&mut self, now_ms: f64) -> Step {
        match self.phase {
            Phase::Created => return Step::Idle,
            Phase::Stopped => return Step::Stopped,
            Phase::Running => {}
        }

        let dt = self.clock.tick(now_ms);

        self.client.update(dt);
        if let Err(e) = self.client.render() {
            log::warn!("render failed: {e:#}");
        }

        Step::Ran { dt }
    }

    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            log::info!(
                "render loop stopped after {} frames",
                self.clock.frame_count()
            );
        }
        self.phase = Phase::Stopped;
    }

    /// Re-baselines the clock so the next delta is measured from `now_ms`.
    pub fn reset(&mut self, now_ms: f64) {
        self.clock.reset(now_ms);
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

/// The host's per-frame callback primitive.
pub trait FrameScheduler {
    /// Runs `callback` once, before the next repaint.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<(), BootstrapError>;
}

/// Runs a [`RenderLoop`] one step per scheduled frame, rescheduling itself after
/// each step until the loop is stopped.
pub struct FrameDriver<C: Client, S: FrameScheduler, T: TimeSource> {
    render_loop: Rc<RefCell<RenderLoop<C>>>,
    scheduler: Rc<S>,
    time: Rc<T>,
}

impl<C: Client, S: FrameScheduler, T: TimeSource> Clone for FrameDriver<C, S, T> {
    fn clone(&self) -> Self {
        Self {
            render_loop: self.render_loop.clone(),
            scheduler: self.scheduler.clone(),
            time: self.time.clone(),
        }
    }
}

impl<C, S, T> FrameDriver<C, S, T>
where
    C: Client + 'static,
    S: FrameScheduler + 'static,
    T: TimeSource + 'static,
{
    pub fn new(render_loop: RenderLoop<C>, scheduler: Rc<S>, time: Rc<T>) -> Self {
        Self {
            render_loop: Rc::new(RefCell::new(render_loop)),
            scheduler,
            time,
        }
    }

    /// Starts the loop and schedules the first frame.
    pub fn start(&self) -> Result<(), BootstrapError> {
        let now = self.time.now_ms();
        self.render_loop.borrow_mut().start(now)?;
        self.schedule_next()
    }

    pub fn stop(&self) {
        self.render_loop.borrow_mut().stop();
    }

    pub fn render_loop(&self) -> &Rc<RefCell<RenderLoop<C>>> {
        &self.render_loop
    }

    fn schedule_next(&self) -> Result<(), BootstrapError> {
        let driver = self.clone();
        self.scheduler
            .request_frame(Box::new(move || driver.frame()))
    }

    fn frame(&self) {
        let now = self.time.now_ms();
        let step = self.render_loop.borrow_mut().step(now);

        match step {
            Step::Ran { .. } => {
                if let Err(e) = self.schedule_next() {
                    log::error!("render loop ended: {e}");
                    self.stop();
                }
            }
            Step::Idle => log::warn!("frame fired before the render loop was started"),
            Step::Stopped => log::debug!("frame fired after stop, not rescheduling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        starts: u32,
        updates: Vec<f32>,
        renders: u32,
        fail_start: bool,
        fail_render: bool,
    }

    impl Client for Counting {
        fn start(&mut self) -> anyhow::Result<()> {
            self.starts += 1;
            if self.fail_start {
                anyhow::bail!("no context");
            }
            Ok(())
        }

        fn update(&mut self, dt: f32) {
            self.updates.push(dt);
        }

        fn render(&mut self) -> anyhow::Result<()> {
            self.renders += 1;
            if self.fail_render {
                anyhow::bail!("surface lost");
            }
            Ok(())
        }
    }

    #[test]
    fn step_before_start_is_idle() {
        let mut render_loop = RenderLoop::new(Counting::default());
        assert_eq!(render_loop.step(10.0), Step::Idle);
        assert!(render_loop.client().updates.is_empty());
        assert_eq!(render_loop.client().renders, 0);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut render_loop = RenderLoop::new(Counting::default());
        render_loop.start(0.0).unwrap();
        assert!(matches!(
            render_loop.start(5.0),
            Err(BootstrapError::AlreadyStarted)
        ));
        assert_eq!(render_loop.client().starts, 1);
    }

    #[test]
    fn failed_start_never_runs_frames() {
        let mut render_loop = RenderLoop::new(Counting {
            fail_start: true,
            ..Default::default()
        });
        assert!(matches!(
            render_loop.start(0.0),
            Err(BootstrapError::Start(_))
        ));
        assert!(!render_loop.is_running());
        assert_eq!(render_loop.step(16.0), Step::Idle);
        assert!(render_loop.client().updates.is_empty());
    }

    #[test]
    fn steps_feed_seconds_to_update() {
        let mut render_loop = RenderLoop::new(Counting::default());
        render_loop.start(100.0).unwrap();
        assert_eq!(render_loop.step(116.0), Step::Ran { dt: (16.0 * 0.001) as f32 });
        render_loop.step(150.0);

        let client = render_loop.client();
        assert_eq!(
            client.updates,
            vec![(16.0 * 0.001) as f32, (34.0 * 0.001) as f32]
        );
        assert_eq!(client.renders, 2);
    }

    #[test]
    fn render_errors_do_not_stop_the_loop() {
        let mut render_loop = RenderLoop::new(Counting {
            fail_render: true,
            ..Default::default()
        });
        render_loop.start(0.0).unwrap();
        assert!(matches!(render_loop.step(16.0), Step::Ran { .. }));
        assert!(matches!(render_loop.step(32.0), Step::Ran { .. }));
        assert_eq!(render_loop.client().renders, 2);
    }

    #[test]
    fn stop_and_reset() {
        let mut render_loop = RenderLoop::new(Counting::default());
        render_loop.start(0.0).unwrap();
        render_loop.reset(1_000.0);
        assert_eq!(render_loop.step(1_010.0), Step::Ran { dt: (10.0 * 0.001) as f32 });
        assert_eq!(render_loop.clock().frame_count(), 1);
        assert_eq!(render_loop.clock().last_timestamp(), Some(1_010.0));

        render_loop.stop();
        assert_eq!(render_loop.step(1_020.0), Step::Stopped);
        assert_eq!(render_loop.client().renders, 1);
        assert!(matches!(
            render_loop.start(1_030.0),
            Err(BootstrapError::AlreadyStarted)
        ));
    }
}
