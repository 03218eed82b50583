pub mod athlete;
pub mod athlete_fetch;
pub mod config;
pub mod debounce;
pub mod feed;
pub mod filters;
pub mod http_cache;
pub mod http_client;
pub mod pagination;
pub mod query;
pub mod router;
pub mod state;
pub mod stats;
