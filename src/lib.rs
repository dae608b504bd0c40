pub mod backend;
pub mod cli;
pub mod rewards;
pub mod server;
