pub mod cli;
pub mod driver;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod projects;

#[cfg(test)]
mod tests;
