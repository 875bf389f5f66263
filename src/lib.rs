pub mod cli;
pub mod config;
pub mod criteria;
pub mod models;
pub mod scoring;
pub mod storage;
pub mod table;
