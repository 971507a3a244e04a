//! MIVES Engine - Integrated Value Model for Sustainable Assessment
//!
//! This crate implements the MIVES scoring engine: exponential value functions,
//! weighted Requirement → Criterion → Indicator aggregation, and the layout of
//! proportional flow diagrams built from the resulting weights and scores.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
