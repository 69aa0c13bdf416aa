/// A rendering client driven by the frame loop.
///
/// The loop calls [`Client::start`] exactly once, then [`Client::update`] followed by
/// [`Client::render`] once per frame. Nothing else is called.
pub trait Client {
    /// Allocates whatever the client needs before the first frame.
    fn start(&mut self) -> anyhow::Result<()>;
    /// Advances the client by `dt` seconds.
    fn update(&mut self, dt: f32);
    /// Draws the current state. An error is logged and the loop carries on.
    fn render(&mut self) -> anyhow::Result<()>;
}

