use opsdash::chart::layout::build_scene;
use opsdash::render::{DEFAULT_CLEAR_COLOR, render_to_file};
use opsdash::{ChartRenderer, ChartStyle, Dataset, Surface, SurfaceRegistry};

fn sample() -> Dataset {
    [("Jan", 100.0), ("Feb", 50.0), ("Mar", 0.0)]
        .into_iter()
        .collect()
}

#[test]
fn draw_changes_pixels_from_clear_color() {
    let mut registry = SurfaceRegistry::new();
    registry.insert("chart", Surface::new(400, 300));

    let renderer = ChartRenderer::new(&mut registry, "chart", sample(), ChartStyle::bar());
    assert!(!renderer.is_inert());
    assert!(renderer.scene().is_some_and(|s| s.has_geometry()));

    let surface = registry.get("chart").unwrap();
    let clear = (
        DEFAULT_CLEAR_COLOR.r,
        DEFAULT_CLEAR_COLOR.g,
        DEFAULT_CLEAR_COLOR.b,
    );
    let painted = (0..300)
        .flat_map(|y| (0..400).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y) != Some(clear))
        .count();
    assert!(painted > 0, "axes and bars must leave marks on the raster");
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let surface = Surface::new(10, 8);
    assert!(surface.pixel(9, 7).is_some());
    assert_eq!(surface.pixel(10, 0), None);
    assert_eq!(surface.pixel(0, 8), None);
    assert_eq!(surface.pixel(u32::MAX, u32::MAX), None);
}

#[test]
fn unknown_surface_id_leaves_renderer_inert() {
    let mut registry = SurfaceRegistry::new();
    registry.insert("chart", Surface::new(100, 100));

    // Must not panic, only log; every later call is a no-op.
    let mut renderer =
        ChartRenderer::new(&mut registry, "does-not-exist", sample(), ChartStyle::bar());
    assert!(renderer.is_inert());
    assert!(renderer.scene().is_none());
    renderer.redraw(Dataset::new());
    assert!(renderer.scene().is_none());
}

#[test]
fn redraw_repaints_from_scratch() {
    let mut registry = SurfaceRegistry::new();
    registry.insert("chart", Surface::new(400, 300));

    let mut renderer = ChartRenderer::new(&mut registry, "chart", sample(), ChartStyle::bar());
    let first = renderer.scene().unwrap().clone();
    assert_eq!(first.rects.len(), 3);

    renderer.redraw([("Apr", 75.0)].into_iter().collect());
    let second = renderer.scene().unwrap();
    assert_eq!(second.rects.len(), 1, "nothing persists between passes");

    renderer.redraw(Dataset::new());
    let third = renderer.scene().unwrap();
    assert!(!third.has_geometry(), "empty redraw falls back to placeholder");
}

#[test]
fn empty_dataset_raster_shows_no_geometry() {
    let mut registry = SurfaceRegistry::new();
    registry.insert("chart", Surface::new(200, 150));

    let renderer = ChartRenderer::new(&mut registry, "chart", Dataset::new(), ChartStyle::line());
    let scene = renderer.scene().unwrap();
    assert!(!scene.has_geometry());
    assert_eq!(scene.texts.len(), 1);
}

#[test]
fn render_to_file_writes_svg_and_png() {
    let dir = tempfile::tempdir().unwrap();
    let scene = build_scene(&sample(), &ChartStyle::line(), 400, 300);

    let svg = dir.path().join("chart.svg");
    render_to_file(&scene, &svg, DEFAULT_CLEAR_COLOR).unwrap();
    let svg_text = std::fs::read_to_string(&svg).unwrap();
    assert!(svg_text.contains("<svg"));

    let png = dir.path().join("chart.png");
    render_to_file(&scene, &png, DEFAULT_CLEAR_COLOR).unwrap();
    assert!(std::fs::metadata(&png).unwrap().len() > 0);
}

#[test]
fn save_png_round_trips_surface_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = SurfaceRegistry::new();
    registry.insert("chart", Surface::new(120, 80));
    let _ = ChartRenderer::new(&mut registry, "chart", sample(), ChartStyle::bar());

    let path = dir.path().join("out.png");
    registry.get("chart").unwrap().save_png(&path).unwrap();
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (120, 80));
}
