//! Broadside - Naval Quiz Battle
//!
//! Answer trivia to fire on an enemy ship. Wrong answers drain shields, then
//! hull. The library holds the question bank, the combat rules engine, battle
//! sessions and post-battle ranking; rendering, input and storage belong to
//! the driver.

pub mod campaign;
pub mod combat;
pub mod core;
pub mod persistence;
pub mod quiz;
pub mod scoring;
