use std::{cell::Cell, rc::Rc};

/// Something with an inner size, e.g. the browser window.
pub trait Viewport {
    fn viewport_size(&self) -> (u32, u32);
}

/// A surface whose pixel dimensions can be set, e.g. a `<canvas>`.
pub trait DrawingSurface {
    fn surface_size(&self) -> (u32, u32);
    fn set_surface_size(&self, width: u32, height: u32);
}

impl<V: Viewport + ?Sized> Viewport for Rc<V> {
    fn viewport_size(&self) -> (u32, u32) {
        (**self).viewport_size()
    }
}

impl<D: DrawingSurface + ?Sized> DrawingSurface for Rc<D> {
    fn surface_size(&self) -> (u32, u32) {
        (**self).surface_size()
    }

    fn set_surface_size(&self, width: u32, height: u32) {
        (**self).set_surface_size(width, height)
    }
}

impl<D: DrawingSurface + ?Sized> DrawingSurface for Box<D> {
    fn surface_size(&self) -> (u32, u32) {
        (**self).surface_size()
    }

    fn set_surface_size(&self, width: u32, height: u32) {
        (**self).set_surface_size(width, height)
    }
}

/// Drawing surface size shared between the resizer and whoever draws, for hosts
/// without a canvas element.
#[derive(Debug, Clone, Default)]
pub struct SharedSize(Rc<Cell<(u32, u32)>>);

impl SharedSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(Cell::new((width, height))))
    }
}

impl DrawingSurface for SharedSize {
    fn surface_size(&self) -> (u32, u32) {
        self.0.get()
    }

    fn set_surface_size(&self, width: u32, height: u32) {
        self.0.set((width, height));
    }
}

/// Keeps a drawing surface the same size as the viewport.
pub struct CanvasResizer<V: Viewport, D: DrawingSurface> {
    viewport: V,
    surface: D,
}

impl<V: Viewport, D: DrawingSurface> CanvasResizer<V, D> {
    /// Creates the resizer and syncs once, so the surface is sized before any
    /// resize event arrives.
    pub fn attach(viewport: V, surface: D) -> Self {
        let resizer = Self { viewport, surface };
        resizer.sync();
        resizer
    }

    /// Copies the viewport's size onto the surface.
    pub fn sync(&self) -> (u32, u32) {
        let (width, height) = self.viewport.viewport_size();
        self.surface.set_surface_size(width, height);
        log::debug!("drawing surface resized to {width}x{height}");
        (width, height)
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }
}
