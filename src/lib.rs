pub mod grid;
pub mod http_client;
pub mod report;
pub mod retry;
pub mod season;
pub mod stats_api;
