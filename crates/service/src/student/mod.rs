pub mod repository;
pub mod memory;
pub mod service;
