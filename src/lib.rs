//! opsdash
//!
//! A lightweight Rust library for rendering, refreshing, and tabulating the
//! metrics of a freelance-operations dashboard. Pairs with the `opsdash` CLI.
//!
//! ### Features
//! - Bar and line charts of ordered label→value datasets, painted onto
//!   in-memory raster surfaces or PNG/SVG files
//! - Blocking client for the dashboard backend API with typed payloads
//! - An owned refresh scheduler instead of a global timer handle
//! - Sortable/filterable table views and currency/date display formatting
//!
//! ### Example
//! ```no_run
//! use opsdash::{ChartRenderer, ChartStyle, Dataset, Surface, SurfaceRegistry};
//!
//! let mut registry = SurfaceRegistry::new();
//! registry.insert("revenue-chart", Surface::new(400, 300));
//!
//! let dataset: Dataset = [("Jan", 100.0), ("Feb", 50.0), ("Mar", 0.0)]
//!     .into_iter()
//!     .collect();
//! let mut chart =
//!     ChartRenderer::new(&mut registry, "revenue-chart", dataset, ChartStyle::bar());
//! chart.redraw([("Apr", 75.0)].into_iter().collect());
//! ```

pub mod api;
pub mod chart;
pub mod error;
pub mod format;
pub mod models;
pub mod refresh;
pub mod render;
pub mod table;

pub use api::Client;
pub use chart::{ChartKind, ChartRenderer, ChartStyle, Rgba, Scene};
pub use error::DashError;
pub use models::{Dataset, Overview, RevenueReport, TimeTrackingReport};
pub use refresh::RefreshScheduler;
pub use render::{Surface, SurfaceRegistry};
pub use table::{SortOrder, TableView};
