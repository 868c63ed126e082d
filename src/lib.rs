pub mod config;
pub mod logger;
pub mod error;
pub mod markup;
pub mod post_filter;
pub mod model;
pub mod store;
pub mod session;
pub mod assets;
pub mod text_utils;
pub mod forms;
pub mod contact;
pub mod server;
mod query_string;
mod view;
