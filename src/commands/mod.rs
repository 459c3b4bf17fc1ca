pub mod instances_cmd;
pub mod serve_cmd;
pub mod sign_cmd;
