//! Generate images through OpenRouter and store them as Xcode image sets
//!
//! Requests an image from OpenRouter's chat-completions API, decodes the inline
//! or remote image it returns, and writes it into an existing asset catalog as
//! `<name>.imageset`. Can also list the models that support image generation.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod http;
pub mod imageset;
pub mod mime;
pub mod mock;
pub mod models;

pub use error::{Error, Result};
