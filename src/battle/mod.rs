pub mod commands;
pub mod damage;
pub mod engine;
pub mod runner;
pub mod state;
pub mod weather;

#[cfg(test)]
mod tests;
