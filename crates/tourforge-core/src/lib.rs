//! TourForge Core - Core types for tour optimization
//!
//! This crate provides the fundamental abstractions for TourForge:
//! - Cities and the per-run city registry
//! - Euclidean distances and distance meters
//! - Tours and tour length evaluation
//! - Error types shared by every TourForge crate

pub mod city;
pub mod distance;
pub mod error;
pub mod tour;

pub use city::{City, CityId, CityRegistry};
pub use distance::{distance, DistanceMatrix, DistanceMeter};
pub use error::{Result, TourForgeError};
pub use tour::{total_distance, Tour};
