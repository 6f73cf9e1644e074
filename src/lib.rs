//! Studycurve - study-time vs GPA learning-effect analyzer
//!
//! This library provides the core functionality for the Studycurve service:
//! dataset ingestion, the fixed learning-effect models with numeric and
//! symbolic integration, SVG plot rendering and the HTTP API.
//!
//! # Architecture
//! - `ingest`: observation rows and CSV dataset construction
//! - `analysis`: learning-effect models, adaptive quadrature, analysis reports
//! - `render`: SVG scatter/curve/area plot
//! - `api`: HTTP services and response envelopes
//! - `config`: configuration management
//! - `system`: logging initialization

pub mod analysis;
pub mod api;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod render;
pub mod system;
