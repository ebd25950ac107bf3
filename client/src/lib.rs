//! Client for CEP-47 NFT contracts deployed on a Casper network.
//!
//! The [`Cep47Client`] marshals typed arguments into the contract's runtime
//! arguments, dispatches deploys and reads contract state through a
//! [`NodeClient`]. [`CasperNode`] is the JSON-RPC backed implementation.

pub mod args;
pub mod client;
pub mod config;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod node;
pub mod rpc;

pub use args::{Cep47InstallArgs, Meta, TokenId};
pub use client::Cep47Client;
pub use config::ClientConfig;
pub use error::{Cep47Error, Result};
pub use node::{DeployRequest, NodeClient, Session};
pub use rpc::CasperNode;
