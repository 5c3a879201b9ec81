pub mod api;
pub mod download;
pub mod logging;
pub mod session;
pub mod transport;
