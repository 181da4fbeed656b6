pub mod args;
pub mod config;
pub mod http;
pub mod identity;
pub mod keypair;
pub mod logging;
pub mod servers;
pub mod services;
pub mod session;
pub mod signing;
pub mod textures;
