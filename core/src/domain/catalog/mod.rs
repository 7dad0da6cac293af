pub mod assembler;
pub mod card;
pub mod entities;
pub mod filter_params;
pub mod ports;
pub mod predicate;
pub mod services;
pub mod value_objects;
