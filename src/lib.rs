//! # NMEA Health Library
//!
//! Error tracking and fix-quality advice for NMEA-0183 parsing sessions.
//!
//! This library sits next to an external NMEA parser and turns what it
//! reports into something an integrator can act on:
//! - [`tracker::ErrorTracker`] counts outcomes and categorized errors, keeps a
//!   health verdict and rate-limits diagnostics
//! - [`quality::QualityAdvisor`] rates a GNSS snapshot and says whether the
//!   position is safe to use
//! - [`session::ParseSession`] wires a parser to a tracker

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod quality;
pub mod session;
pub mod telemetry;
pub mod tracker;
