//! Deterministic name → attribute engine.
//!
//! A display name (optionally `personal@team`) is hashed through an RC4-style
//! key schedule into a 128-entry "name base"; properties and skills are read
//! off that base and off a second stream drawn from the same permutation.

pub mod name;
pub mod rc4;

pub use name::{
    derive, split_name, Name, ParseError, Skill, EMPTY_SKILL_ID, MAX_SEGMENT_LEN, NAME_BASE_LEN,
    PROPERTY_COUNT, SKILL_POOL, SKILL_SLOTS,
};
