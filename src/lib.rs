pub mod app;
pub mod cli;
pub mod combine;
pub mod config;
pub mod nav;
pub mod output;
pub mod runner;
pub mod transform;

#[cfg(test)]
mod tests;
