/// Launch settings shared by the web and desktop hosts.
#[derive(Debug, Clone)]
pub struct Config {
    /// id of the `<canvas>` element to draw into (web)
    pub canvas_id: String,
    /// window title (desktop)
    pub title: String,
    /// initial window size (desktop), the browser sizes the canvas from the viewport
    pub window_size: (u32, u32),
    pub log_level: log::Level,
}

impl Config {
    pub fn new() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            title: "canvas-loop".to_string(),
            window_size: (960, 540),
            log_level: log::Level::Info,
        }
    }

    pub fn with_canvas_id<T: Into<String>>(&mut self, canvas_id: T) -> &mut Self {
        self.canvas_id = canvas_id.into();
        self
    }

    pub fn with_title<T: Into<String>>(&mut self, title: T) -> &mut Self {
        self.title = title.into();
        self
    }

    pub fn with_size(&mut self, width: u32, height: u32) -> &mut Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_log_level(&mut self, level: log::Level) -> &mut Self {
        self.log_level = level;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
