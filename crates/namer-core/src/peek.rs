//! Batch "peek": show the attributes of many names at once.
//!
//! Each line is derived on its own; a bad line is reported and skipped, it
//! never aborts the rest of the batch.

use std::fmt::Write as _;

use serde::Serialize;

use crate::{
    display::{render_attributes, DisplayBlock},
    engine::derive,
    Result,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PeekEntry {
    Parsed {
        index: usize,
        block: DisplayBlock,
    },
    Failed {
        index: usize,
        raw: String,
        reason: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PeekReport {
    pub entries: Vec<PeekEntry>,
}

/// Peek every non-empty line of `input`. Indices are 1-based over those lines.
pub fn peek(input: &str, use_bonus: bool) -> PeekReport {
    let entries = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, raw)| peek_one(i + 1, raw, use_bonus))
        .collect();

    PeekReport { entries }
}

fn peek_one(index: usize, raw: &str, use_bonus: bool) -> PeekEntry {
    match derive(raw) {
        Ok(mut name) => PeekEntry::Parsed {
            index,
            block: render_attributes(&mut name, use_bonus),
        },
        Err(e) => PeekEntry::Failed {
            index,
            raw: raw.to_string(),
            reason: e.to_string(),
        },
    }
}

impl PeekReport {
    pub fn parsed(&self) -> impl Iterator<Item = &DisplayBlock> {
        self.entries.iter().filter_map(|e| match e {
            PeekEntry::Parsed { block, .. } => Some(block),
            PeekEntry::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().filter_map(|e| match e {
            PeekEntry::Failed { index, raw, .. } => Some((*index, raw.as_str())),
            PeekEntry::Parsed { .. } => None,
        })
    }

    /// Chat text: failures first, then one block per parsed name, then a
    /// `版本:{version}` footer naming the plugin release that answered.
    pub fn render(&self, version: &str) -> String {
        let mut out = String::new();
        for (index, raw) in self.failures() {
            let _ = writeln!(out, "{index} {raw} 无法解析");
        }
        for block in self.parsed() {
            let _ = writeln!(out, "{block}");
            out.push('\n');
        }
        let _ = write!(out, "版本:{version}");
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
