pub mod browse;
pub mod manage;
