//! Chart rendering: dataset + style + surface → painted bar/line chart.
//!
//! A [`ChartRenderer`] is bound at construction to one surface (resolved by id
//! through a [`SurfaceRegistry`](crate::render::SurfaceRegistry)) and performs
//! one synchronous draw pass immediately. An unresolved surface id is logged
//! and leaves the renderer inert rather than failing the host.

pub mod layout;
pub mod scene;
pub mod style;

pub use scene::{MarkerPrim, PolylinePrim, RectPrim, Scene, TextAnchor, TextPrim};
pub use style::{ChartKind, ChartStyle, Rgba};

use crate::models::Dataset;
use crate::render::{Surface, SurfaceRegistry};
use log::{error, warn};

/// Draws one chart onto one surface.
///
/// Each draw clears and fully repaints the bound surface; nothing persists
/// between passes, so [`redraw`](ChartRenderer::redraw) with a fresh dataset
/// is all a periodic refresh needs.
pub struct ChartRenderer<'a> {
    surface: Option<&'a mut Surface>,
    dataset: Dataset,
    style: ChartStyle,
    scene: Option<Scene>,
}

impl<'a> ChartRenderer<'a> {
    /// Bind to `surface_id` and draw `dataset` immediately.
    ///
    /// If the id does not resolve, the error is logged and the renderer is
    /// inert: every later call is a no-op. This mirrors the recoverable
    /// "surface missing from the page" condition and never panics.
    pub fn new(
        registry: &'a mut SurfaceRegistry,
        surface_id: &str,
        dataset: Dataset,
        style: ChartStyle,
    ) -> Self {
        let surface = match registry.resolve(surface_id) {
            Ok(surface) => Some(surface),
            Err(e) => {
                error!("{e}; chart will not be drawn");
                None
            }
        };
        let mut renderer = Self {
            surface,
            dataset,
            style,
            scene: None,
        };
        renderer.draw();
        renderer
    }

    /// True when construction failed to resolve a surface.
    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    /// Replace the dataset and repaint.
    pub fn redraw(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.draw();
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Draw plan of the last completed pass; `None` while inert.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_deref_mut() else {
            return;
        };
        let scene = layout::build_scene(
            &self.dataset,
            &self.style,
            surface.width(),
            surface.height(),
        );
        match surface.draw(&scene) {
            Ok(()) => self.scene = Some(scene),
            Err(e) => warn!("chart draw failed: {e:#}"),
        }
    }
}
