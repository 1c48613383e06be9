pub mod errors;
pub mod gateway;
pub mod models;
pub mod ports;
