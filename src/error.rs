use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("client failed to initialize")]
    Init(#[source] anyhow::Error),
    #[error("client failed to start")]
    Start(#[source] anyhow::Error),
    #[error("render loop has already been started")]
    AlreadyStarted,
    #[error("a client has already been launched in this process")]
    AlreadyLaunched,
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("failed to request an animation frame: {0}")]
    Schedule(String),
    #[error("failed to register `{event}` listener: {reason}")]
    Listener { event: &'static str, reason: String },
    #[error("failed to create window: {0}")]
    Window(String),
}
