//! Drawing surfaces and scene painting.
//!
//! A [`Surface`] is an in-memory RGB raster owned by the hosting application
//! and handed to a chart renderer for the duration of one draw pass. Painting
//! goes through Plotters so the same [`Scene`] renders to the in-memory
//! bitmap, a PNG file, or an SVG file.

use crate::chart::scene::{Scene, TextAnchor};
use crate::chart::style::Rgba;
use crate::error::DashError;
use anyhow::{Result, anyhow};
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::collections::HashMap;
use std::path::Path;

/// Background the surface is cleared to before each pass. Matches the dark
/// dashboard theme the label colors were chosen against.
pub const DEFAULT_CLEAR_COLOR: Rgba = Rgba::rgb(0x1e, 0x1e, 0x1e);

/// Fixed-size RGB raster target for one chart.
///
/// Every draw clears and fully repaints; no state survives between passes.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    clear_color: Rgba,
    buf: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_clear_color(width, height, DEFAULT_CLEAR_COLOR)
    }

    pub fn with_clear_color(width: u32, height: u32, clear_color: Rgba) -> Self {
        Self {
            width,
            height,
            clear_color,
            buf: vec![0u8; (width * height * 3) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major, 3 bytes per pixel.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// RGB value at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some((self.buf[i], self.buf[i + 1], self.buf[i + 2]))
    }

    /// Clear to the background color and paint `scene`.
    pub fn draw(&mut self, scene: &Scene) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let clear = self.clear_color;
        let root = BitMapBackend::with_buffer(&mut self.buf, (width, height)).into_drawing_area();
        root.fill(&to_rgb(clear)).map_err(|e| anyhow!("{:?}", e))?;
        paint_scene(&root, scene)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }

    /// Encode the current buffer as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        image::save_buffer(
            path.as_ref(),
            &self.buf,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(())
    }
}

/// Surfaces addressable by the string ids the hosting page uses.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, Surface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, surface: Surface) {
        self.surfaces.insert(id.into(), surface);
    }

    pub fn get(&self, id: &str) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Surface> {
        self.surfaces.get_mut(id)
    }

    /// Resolve an id or report [`DashError::SurfaceNotFound`].
    pub fn resolve(&mut self, id: &str) -> Result<&mut Surface, DashError> {
        self.surfaces
            .get_mut(id)
            .ok_or_else(|| DashError::SurfaceNotFound(id.to_string()))
    }
}

/// Render a scene straight to a file; `.svg` gets the SVG backend, everything
/// else the bitmap backend.
pub fn render_to_file<P: AsRef<Path>>(
    scene: &Scene,
    out_path: P,
    clear_color: Rgba,
) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let dims = (scene.width, scene.height);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), dims).into_drawing_area();
        root.fill(&to_rgb(clear_color))
            .map_err(|e| anyhow!("{:?}", e))?;
        paint_scene(&root, scene)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), dims).into_drawing_area();
        root.fill(&to_rgb(clear_color))
            .map_err(|e| anyhow!("{:?}", e))?;
        paint_scene(&root, scene)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn to_rgba(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

fn to_rgb(c: Rgba) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Plotters only rasterizes quarter-turn text; snap arbitrary angles to the
/// nearest one. The scene keeps the exact intent for other backends.
fn snap_rotation(deg: f64) -> FontTransform {
    let norm = deg.rem_euclid(360.0);
    if !(45.0..315.0).contains(&norm) {
        FontTransform::None
    } else if norm < 135.0 {
        FontTransform::Rotate90
    } else if norm < 225.0 {
        FontTransform::Rotate180
    } else {
        FontTransform::Rotate270
    }
}

fn anchor_pos(anchor: TextAnchor) -> Pos {
    let h = match anchor {
        TextAnchor::Left => HPos::Left,
        TextAnchor::Center => HPos::Center,
        TextAnchor::Right => HPos::Right,
    };
    Pos::new(h, VPos::Bottom)
}

/// Execute a scene's primitives on any Plotters backend.
///
/// Geometry failures abort the pass; text failures do not. The `ab_glyph`
/// font path has no usable font unless one was registered, so labels are
/// painted best-effort and skipped with a warning when the backend refuses
/// them.
pub fn paint_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene) -> Result<()>
where
    DB: DrawingBackend,
{
    for poly in &scene.polylines {
        if poly.points.len() < 2 {
            continue;
        }
        let points: Vec<(i32, i32)> = poly
            .points
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        let style = ShapeStyle {
            color: to_rgba(poly.stroke),
            filled: false,
            stroke_width: poly.stroke_width,
        };
        root.draw(&PathElement::new(points, style))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    for rect in &scene.rects {
        let (mut y0, mut y1) = (rect.y, rect.y + rect.height);
        if y0 > y1 {
            std::mem::swap(&mut y0, &mut y1);
        }
        let corners = [
            (rect.x.round() as i32, y0.round() as i32),
            ((rect.x + rect.width).round() as i32, y1.round() as i32),
        ];
        root.draw(&Rectangle::new(corners, to_rgba(rect.fill).filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        if rect.stroke_width > 0 {
            let outline = ShapeStyle {
                color: to_rgba(rect.stroke),
                filled: false,
                stroke_width: rect.stroke_width,
            };
            root.draw(&Rectangle::new(corners, outline))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    for marker in &scene.markers {
        root.draw(&Circle::new(
            (marker.x.round() as i32, marker.y.round() as i32),
            marker.radius.round() as i32,
            to_rgba(marker.fill).filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    let mut skipped_labels = 0usize;
    for text in &scene.texts {
        let color = to_rgba(text.color);
        let style = ("sans-serif", text.font_px)
            .into_font()
            .color(&color)
            .pos(anchor_pos(text.anchor))
            .transform(snap_rotation(text.rotation_deg));
        let element = Text::new(
            text.text.clone(),
            (text.x.round() as i32, text.y.round() as i32),
            style,
        );
        if root.draw(&element).is_err() {
            skipped_labels += 1;
        }
    }
    if skipped_labels > 0 {
        warn!("skipped {skipped_labels} text label(s): no usable font registered for this backend");
    }

    Ok(())
}
