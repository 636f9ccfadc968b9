pub mod config;
pub mod database;
pub mod maps;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod upload;

#[cfg(test)]
mod testdata;
