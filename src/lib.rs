pub mod cart;
pub mod config;
pub mod error;
pub mod history;
pub mod item;
pub mod order;
pub mod pricing;
pub mod screen;
pub mod service;
pub mod store;
pub mod utils;
