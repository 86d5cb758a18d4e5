pub mod data;
pub mod endpoints;
pub mod seed;
pub mod selection;
pub mod stats;
pub mod tree;
