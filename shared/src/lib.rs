pub mod cluster;
pub mod forecast;
pub mod geo;
pub mod kite;
pub mod markers;
pub mod models;
pub mod scoring;
