pub mod mappers;
pub mod repository;
pub mod sql;
