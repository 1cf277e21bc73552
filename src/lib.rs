//! Monster catalog browser
//!
//! Loads a monster dataset, groups it by region, and lets the user search,
//! filter, expand regions and open a detail card for any monster.

pub mod action;
pub mod catalog;
pub mod components;
pub mod config;
pub mod detail;
pub mod effect;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod monster;
pub mod reducer;
pub mod state;
pub mod view;
