pub mod data;
pub mod endpoints;
pub mod gateway;
pub mod prompts;
