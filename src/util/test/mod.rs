pub mod db;
pub mod factory;
