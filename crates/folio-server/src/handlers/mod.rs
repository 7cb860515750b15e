//! HTTP request handlers.

pub(crate) mod layout;
pub(crate) mod pages;
