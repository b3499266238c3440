//! HTTP handlers

pub mod health;
pub mod live_data;
pub mod status;
pub mod predict;
pub mod pages;
