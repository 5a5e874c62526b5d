//! DashScope native API provider

mod config;
mod provider;


pub use config::DashScopeConfig;
pub use provider::DashScope;
