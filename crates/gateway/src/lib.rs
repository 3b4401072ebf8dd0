//! Client for the hosted multimodal generation gateway.
//!
//! - [`config`] -- endpoint, credentials and model selection from the environment.
//! - [`messages`] -- chat-completions wire types.
//! - [`client`] -- [`GatewayClient`], one request per generation, typed failures.

pub mod client;
pub mod config;
pub mod messages;

pub use client::{GatewayClient, GatewayError, GeneratedAsset, GenerationInput};
pub use config::GatewayConfig;
