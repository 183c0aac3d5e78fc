pub mod backend_client;
pub mod shell_controller;
