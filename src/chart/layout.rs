//! Pure chart geometry: map a dataset onto pixel-space primitives.
//!
//! No drawing happens here. Every number below is derived from the surface
//! dimensions, the style's padding, and the dataset; backends just paint the
//! resulting [`Scene`].

use crate::chart::scene::{MarkerPrim, PolylinePrim, RectPrim, Scene, TextAnchor, TextPrim};
use crate::chart::style::{ChartKind, ChartStyle, Rgba};
use crate::models::Dataset;

/// Axis stroke.
const AXIS_COLOR: Rgba = Rgba::rgb(0x40, 0x40, 0x40);
const AXIS_WIDTH: u32 = 2;

/// Value labels above bars/points.
const VALUE_LABEL_COLOR: Rgba = Rgba::rgb(0xe0, 0xe0, 0xe0);
const VALUE_LABEL_PX: u32 = 12;

/// Tick labels below the x axis, tilted for readability.
const TICK_LABEL_COLOR: Rgba = Rgba::rgb(0xb0, 0xb0, 0xb0);
const TICK_LABEL_PX: u32 = 11;
const TICK_LABEL_ROTATION_DEG: f64 = -45.0;
const TICK_LABEL_OFFSET_Y: f64 = 10.0;

const PLACEHOLDER_COLOR: Rgba = Rgba::rgb(0x80, 0x80, 0x80);
const PLACEHOLDER_PX: u32 = 16;
const PLACEHOLDER_TEXT: &str = "No data available";

const MARKER_RADIUS: f64 = 4.0;

/// Fraction of each bar slot occupied by the bar; the rest is inter-bar gap.
const BAR_FILL_RATIO: f64 = 0.8;

/// Build the draw plan for one chart pass.
///
/// An empty dataset yields only the centered placeholder label: no axes, no
/// bars, no markers.
pub fn build_scene(dataset: &Dataset, style: &ChartStyle, width: u32, height: u32) -> Scene {
    if dataset.is_empty() {
        return placeholder_scene(width, height);
    }
    match style.kind {
        ChartKind::Bar => bar_scene(dataset, style, width, height),
        ChartKind::Line => line_scene(dataset, style, width, height),
    }
}

fn placeholder_scene(width: u32, height: u32) -> Scene {
    let mut scene = Scene::new(width, height);
    scene.texts.push(TextPrim {
        text: PLACEHOLDER_TEXT.to_string(),
        x: f64::from(width) / 2.0,
        y: f64::from(height) / 2.0,
        font_px: PLACEHOLDER_PX,
        color: PLACEHOLDER_COLOR,
        anchor: TextAnchor::Center,
        rotation_deg: 0.0,
    });
    scene
}

/// The padded interior where bars and lines live.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    padding: f64,
    width: f64,
    height: f64,
    surface_width: f64,
    surface_height: f64,
}

impl PlotArea {
    fn new(style: &ChartStyle, width: u32, height: u32) -> Self {
        let padding = f64::from(style.padding);
        let (surface_width, surface_height) = (f64::from(width), f64::from(height));
        Self {
            padding,
            width: surface_width - 2.0 * padding,
            height: surface_height - 2.0 * padding,
            surface_width,
            surface_height,
        }
    }

    /// Left vertical + bottom horizontal axis, one continuous L stroke.
    fn axes(&self) -> PolylinePrim {
        PolylinePrim {
            points: vec![
                (self.padding, self.padding),
                (self.padding, self.surface_height - self.padding),
                (
                    self.surface_width - self.padding,
                    self.surface_height - self.padding,
                ),
            ],
            stroke: AXIS_COLOR,
            stroke_width: AXIS_WIDTH,
        }
    }

    /// Pixel height of a value against the scale ceiling; 0 when the ceiling
    /// is 0 so an all-zero or all-negative dataset stays on the baseline.
    fn value_height(&self, value: f64, scale_max: f64) -> f64 {
        if scale_max > 0.0 {
            (value / scale_max) * self.height
        } else {
            0.0
        }
    }

    fn baseline(&self) -> f64 {
        self.surface_height - self.padding
    }
}

fn tick_label(text: &str, x: f64, baseline: f64) -> TextPrim {
    TextPrim {
        text: text.to_string(),
        x,
        y: baseline + TICK_LABEL_OFFSET_Y,
        font_px: TICK_LABEL_PX,
        color: TICK_LABEL_COLOR,
        anchor: TextAnchor::Right,
        rotation_deg: TICK_LABEL_ROTATION_DEG,
    }
}

fn value_label(value: f64, x: f64, y: f64) -> TextPrim {
    TextPrim {
        text: format!("{value:.2}"),
        x,
        y,
        font_px: VALUE_LABEL_PX,
        color: VALUE_LABEL_COLOR,
        anchor: TextAnchor::Center,
        rotation_deg: 0.0,
    }
}

fn bar_scene(dataset: &Dataset, style: &ChartStyle, width: u32, height: u32) -> Scene {
    let mut scene = Scene::new(width, height);
    let plot = PlotArea::new(style, width, height);
    let scale_max = dataset.scale_max();

    scene.polylines.push(plot.axes());

    let n = dataset.len() as f64;
    let slot = plot.width / n;
    let bar_width = slot * BAR_FILL_RATIO;
    let gap = slot * (1.0 - BAR_FILL_RATIO);

    for (index, (label, value)) in dataset.iter().enumerate() {
        let bar_height = plot.value_height(value, scale_max);
        let x = plot.padding + index as f64 * slot + gap / 2.0;
        let y = plot.baseline() - bar_height;

        scene.rects.push(RectPrim {
            x,
            y,
            width: bar_width,
            height: bar_height,
            fill: style.background_color,
            stroke: style.border_color,
            stroke_width: style.border_width,
        });

        let center = x + bar_width / 2.0;
        scene.texts.push(value_label(value, center, y - 5.0));
        scene.texts.push(tick_label(label, center, plot.baseline()));
    }

    scene
}

fn line_scene(dataset: &Dataset, style: &ChartStyle, width: u32, height: u32) -> Scene {
    let mut scene = Scene::new(width, height);
    let plot = PlotArea::new(style, width, height);
    let scale_max = dataset.scale_max();

    scene.polylines.push(plot.axes());

    // For a single point the divisor collapses to 1, leaving it at x = padding.
    let step = plot.width / (dataset.len() - 1).max(1) as f64;

    let points: Vec<(f64, f64)> = dataset
        .values()
        .enumerate()
        .map(|(index, value)| {
            (
                plot.padding + index as f64 * step,
                plot.baseline() - plot.value_height(value, scale_max),
            )
        })
        .collect();

    scene.polylines.push(PolylinePrim {
        points: points.clone(),
        stroke: style.border_color,
        stroke_width: style.border_width,
    });

    for ((label, value), &(x, y)) in dataset.iter().zip(&points) {
        scene.markers.push(MarkerPrim {
            x,
            y,
            radius: MARKER_RADIUS,
            fill: style.color,
        });
        scene.texts.push(value_label(value, x, y - 10.0));
        scene.texts.push(tick_label(label, x, plot.baseline()));
    }

    scene
}
