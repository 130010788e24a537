pub mod proxy_controller;
pub mod system_controller;
