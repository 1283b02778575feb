//! HTTP request handlers for the REST API.

pub mod evidence;
pub mod health;
pub mod search;
