//! Cross-backend chat abstractions (ica and tailchat today).

pub mod port;
pub mod split;
pub mod throttled;
pub mod types;
