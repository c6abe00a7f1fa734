#![warn(clippy::all, clippy::pedantic)]

pub mod cadence_tests;
pub mod scores_tests;
pub mod systems_tests;
