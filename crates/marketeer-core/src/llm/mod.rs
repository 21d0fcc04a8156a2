//! Chat-completion provider abstraction for Marketeer.

pub mod provider;
