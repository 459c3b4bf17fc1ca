// src/handlers/mod.rs

pub mod basic;
pub use basic::{health_handler, root_handler};
pub mod instances;
pub use instances::list_instances;
pub mod webhook;
pub use webhook::handle_webhook;
