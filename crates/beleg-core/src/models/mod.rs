//! Data models for parsed invoice documents.

pub mod invoice;
