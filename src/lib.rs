pub mod api;
pub mod chrono_util;
pub mod config;
pub mod data_collector;
pub mod job;
pub mod observer;
pub mod output;
pub mod parser;
pub mod schema;
pub mod stats;
