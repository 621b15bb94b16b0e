pub mod activity;
pub mod api_types;
pub mod client;
pub mod feed;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;
