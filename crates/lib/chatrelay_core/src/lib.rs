//! # chatrelay_core
//!
//! Core answer resolution for the chat relay.
//!
//! A user message is answered by the first source that claims it:
//! the static [`knowledge`] table, a live [`quote`] lookup, or an AI
//! [`completion`]. The ordering lives in [`resolver`].

pub mod completion;
pub mod knowledge;
pub mod quote;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
