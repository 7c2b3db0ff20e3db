//! Variational auto-encoder graph over burn.
//!
//! The prior, the recognition model and the decoder are assembled into a
//! single ELBO objective ([`ml::model::Vae::forward`]), and the graph can be
//! traversed either way with [`ml::model::Vae::encode`] and
//! [`ml::model::Vae::decode`].
#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
