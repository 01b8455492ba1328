pub mod algs;
pub mod api;
pub mod common;
pub mod http_server;
