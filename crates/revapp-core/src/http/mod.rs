//! HTTP client for the Heroku Platform API

pub mod client;

pub use client::HerokuClient;
