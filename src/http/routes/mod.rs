pub mod api;
pub mod minecraftservices;
pub mod root;
pub mod sessionserver;
