//! Backend-agnostic draw plan for one chart pass.
//!
//! The layout stage emits a `Scene` of pixel-space primitives; backends only
//! execute it. Tests assert chart geometry here without touching a raster.

use crate::chart::style::Rgba;

/// Horizontal text anchor relative to the primitive's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// Axis-aligned filled/outlined rectangle (one bar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrim {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// May be negative when the source value is negative; backends normalize.
    pub height: f64,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: u32,
}

/// Open polyline stroked in one continuous pass (axes, line-chart path).
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrim {
    pub points: Vec<(f64, f64)>,
    pub stroke: Rgba,
    pub stroke_width: u32,
}

/// Filled circular marker at a line-chart point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPrim {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fill: Rgba,
}

/// One text label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrim {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_px: u32,
    pub color: Rgba,
    pub anchor: TextAnchor,
    /// Counter-clockwise rotation in degrees; 0 for horizontal text.
    pub rotation_deg: f64,
}

/// Everything one draw pass paints, in paint order per primitive kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub polylines: Vec<PolylinePrim>,
    pub rects: Vec<RectPrim>,
    pub markers: Vec<MarkerPrim>,
    pub texts: Vec<TextPrim>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// True when nothing but text would be painted (the placeholder case).
    pub fn has_geometry(&self) -> bool {
        !self.polylines.is_empty() || !self.rects.is_empty() || !self.markers.is_empty()
    }
}
