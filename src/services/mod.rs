//! Service client and dashboard controller.

pub mod controller;
pub mod index_client;
