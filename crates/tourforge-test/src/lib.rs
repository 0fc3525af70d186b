//! Shared test fixtures for TourForge crates.
//!
//! This crate provides city sets and brute-force checks for testing.
//! It depends only on `tourforge-core` so solver crates can use it as a
//! dev-dependency without a cycle.
//!
//! - [`cities`] - Small hand-checked instances and seeded random instances
//! - [`check`] - Permutation and local-optimality assertions
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tourforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use tourforge_test::cities::{four_cities, random_cities};
//! use tourforge_test::check::{assert_permutation, has_improving_reversal};
//! ```

pub mod check;
pub mod cities;

pub use check::{assert_permutation, has_improving_reversal};
pub use cities::{four_cities, random_cities, square_cities};
