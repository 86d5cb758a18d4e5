pub mod book;
pub mod data;
pub mod endpoints;
