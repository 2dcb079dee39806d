pub(crate) mod config;
pub(crate) mod connection;
pub(crate) mod http;
