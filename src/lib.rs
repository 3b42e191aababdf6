//! Balear - Balearic daily energy-balance tracker
//!
//! This library fetches the Red Eléctrica daily balance page, parses the
//! production table into structured records, accumulates date ranges into a
//! single dataset and derives the views a dashboard renders.

pub mod app;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod range;
pub mod reports;
pub mod scrape;
pub mod utils;
pub mod views;
