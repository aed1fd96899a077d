pub mod config;
pub mod routing;
pub mod sweep;
pub mod util;
