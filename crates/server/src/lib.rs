pub mod config;
pub mod http;
pub mod notify;
pub mod pipeline;
pub mod state;
pub mod view;
