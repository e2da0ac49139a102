//! Rental Persona - Conversational intake and persona matching
//!
//! This crate turns free-form chat replies into a structured rental profile
//! and matches that profile against a catalog of renter archetypes with a
//! weighted, multi-dimensional score.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use app::{AppError, IntakeApp, IntakeDependencies};
