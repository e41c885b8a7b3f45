pub mod action;
pub mod analytics;
pub mod asset;
pub mod catalog;
pub mod config;
pub mod dca;
pub mod market;
pub mod scenario;
pub mod snapshot;
