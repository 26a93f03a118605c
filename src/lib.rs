//! # thermoglowd
//!
//! A Linux daemon that drives RGB lighting from CPU temperature and daylight.
//!
//! ## Features
//!
//! - **Temperature-mapped color**: linear ramp between two endpoint colors
//! - **Daylight brightness**: sunrise/midday/sunset schedule with a night floor
//! - **Two devices**: liquid-cooler ring/logo zones plus a motherboard zone,
//!   each with its own brightness range and refresh cadence
//! - **Pluggable dispatch**: zones are driven through external control
//!   utilities behind a small trait, so test doubles drop in
//! - **One-shot mode**: a negative interval applies one update and exits
//!
//! ## Example
//!
//! ```no_run
//! use thermoglowd::application::Application;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Application::builder()
//!         .with_intervals(2.0, 10.0)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

pub mod application;
pub mod brightness;
pub mod cli;
pub mod color;
pub mod config;
pub mod controller;
pub mod devices;
pub mod error;
pub mod sensors;
pub mod temperature_sensors;
