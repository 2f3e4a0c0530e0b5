pub mod app;
pub mod cli;
pub mod error;
pub mod feed;
pub mod feed_cmd;
pub mod fetch;
pub mod model;
pub mod series;
pub mod stats;
pub mod tui;
