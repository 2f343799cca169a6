pub mod monitor;
pub mod session;
pub mod utils;
