//! fuelviz
//!
//! A lightweight Rust library for fetching, resolving, and rendering
//! vehicle fuel consumption and emissions aggregates. Pairs with the
//! `fuelviz` CLI.
//!
//! ### Features
//! - Fixed registry of 8 metrics, each mapped to a chart archetype and its axis fields
//! - Record normalization (2-decimal rounding, nulls coalesced to zero)
//! - Data-driven layout: bar thickness, canvas height, and label gutter adapt to the data
//! - Year-partitioned pie charts for the CO2-rating distribution
//! - Raw fuel-consumption listing export as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use fuelviz::{Client, Resolver};
//!
//! let client = Client::default();
//! let records = client.fetch_metric("avgConsMake")?;
//! let spec = Resolver::new().resolve("avgConsMake", &records)?;
//! fuelviz::viz::render_chart(&spec, "avg_cons_make.svg", 1000)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod format;
pub mod layout;
pub mod models;
pub mod registry;
pub mod resolve;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use models::{ChartArchetype, ChartSpec, LayoutParams, MetricDescriptor, Record};
pub use resolve::Resolver;
