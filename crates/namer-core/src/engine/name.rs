use serde::Serialize;

use super::rc4::{identity_table, rc4_schedule, Rc4Stream, Table};

/// Entries in a name base.
pub const NAME_BASE_LEN: usize = 128;
/// Longest accepted key segment, counting the leading zero byte.
pub const MAX_SEGMENT_LEN: usize = 256;
pub const PROPERTY_COUNT: usize = 8;
pub const SKILL_SLOTS: usize = 16;
/// Size of the skill id pool that gets shuffled.
pub const SKILL_POOL: usize = 40;
/// Skill ids at or above this value are empty slots.
pub const EMPTY_SKILL_ID: u8 = 35;

const HP_BASE: u32 = 154;
const PROPERTY_BASE: u32 = 36;
/// Only skills below this id can be picked for the doubled frequency.
const EMPOWER_LIMIT: u8 = 25;
const SKILL_THRESHOLD: u8 = 10;

/// Why a raw name could not be turned into a [`Name`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("name is empty")]
    Empty,

    #[error("name contains more than one '@'")]
    MultipleAt,

    #[error("name segment is too long ({len} bytes, at most {} allowed)", MAX_SEGMENT_LEN - 1)]
    SegmentTooLong { len: usize },
}

/// One derived skill slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Skill {
    pub id: u8,
    pub freq: u32,
}

impl Skill {
    pub fn is_empty_slot(&self) -> bool {
        self.id >= EMPTY_SKILL_ID
    }
}

/// A parsed display name and everything derived from it.
///
/// `base` is fixed at construction. `bonus` starts as a copy and may be
/// modified by callers; `calc_properties` / `calc_skills` read whichever one
/// they are told to and only write the derived fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name {
    raw: String,
    base: [u8; NAME_BASE_LEN],
    bonus: [u8; NAME_BASE_LEN],
    properties: [u32; PROPERTY_COUNT],
    skills: [Skill; SKILL_SLOTS],
    table: Table,
}

/// Split a raw name into its personal and team parts.
///
/// The split happens at the last `@`. A missing or empty team part means the
/// personal part doubles as the team.
pub fn split_name(raw: &str) -> Result<(&str, &str), ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }
    if raw.matches('@').count() > 1 {
        return Err(ParseError::MultipleAt);
    }

    Ok(match raw.rsplit_once('@') {
        Some((personal, "")) => (personal, personal),
        Some((personal, team)) => (personal, team),
        None => (raw, raw),
    })
}

/// Derive a [`Name`] from raw input.
pub fn derive(raw: &str) -> Result<Name, ParseError> {
    Name::derive(raw)
}

fn key_bytes(segment: &str) -> Result<Vec<u8>, ParseError> {
    let mut key = Vec::with_capacity(segment.len() + 1);
    key.push(0);
    key.extend_from_slice(segment.as_bytes());
    if key.len() > MAX_SEGMENT_LEN {
        return Err(ParseError::SegmentTooLong { len: segment.len() });
    }
    Ok(key)
}

fn min4(xs: &[u8]) -> u8 {
    xs.iter().copied().min().unwrap_or(0)
}

impl Name {
    pub fn derive(raw: &str) -> Result<Self, ParseError> {
        let (personal, team) = split_name(raw)?;
        let name_key = key_bytes(personal)?;
        let team_key = key_bytes(team)?;

        let mut table = identity_table();
        rc4_schedule(&team_key, &mut table);
        for _ in 0..2 {
            rc4_schedule(&name_key, &mut table);
        }

        // 181 is odd, so the affine map is a bijection on bytes and exactly
        // 128 of the 256 outputs land in [89, 217).
        let mut base = [0u8; NAME_BASE_LEN];
        let picked = table
            .iter()
            .map(|&v| v.wrapping_mul(181).wrapping_add(160))
            .filter(|m| (89..217).contains(m));
        for (slot, m) in base.iter_mut().zip(picked) {
            *slot = m & 63;
        }

        Ok(Self {
            raw: raw.to_string(),
            base,
            bonus: base,
            properties: [0; PROPERTY_COUNT],
            skills: [Skill::default(); SKILL_SLOTS],
            table,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn base(&self) -> &[u8; NAME_BASE_LEN] {
        &self.base
    }

    pub fn bonus(&self) -> &[u8; NAME_BASE_LEN] {
        &self.bonus
    }

    /// Mutable access to the bonus copy for modifiers applied on top of the base.
    pub fn bonus_mut(&mut self) -> &mut [u8; NAME_BASE_LEN] {
        &mut self.bonus
    }

    /// HP, Attack, Defense, Speed, Agility, Magic, Resistance, Intelligence.
    pub fn properties(&self) -> &[u32; PROPERTY_COUNT] {
        &self.properties
    }

    pub fn skills(&self) -> &[Skill; SKILL_SLOTS] {
        &self.skills
    }

    fn source(&self, use_bonus: bool) -> &[u8; NAME_BASE_LEN] {
        if use_bonus {
            &self.bonus
        } else {
            &self.base
        }
    }

    /// Fill in the eight properties from the first 32 bytes of base or bonus.
    ///
    /// Works on a private copy; `base` and `bonus` are left untouched.
    pub fn calc_properties(&mut self, use_bonus: bool) {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.source(use_bonus)[..32]);

        for (k, off) in (10..31).step_by(3).enumerate() {
            let window = &mut r[off..off + 3];
            window.sort_unstable();
            self.properties[k + 1] = window[1] as u32 + PROPERTY_BASE;
        }

        r[..10].sort_unstable();
        self.properties[0] = HP_BASE + r[3..7].iter().map(|&v| v as u32).sum::<u32>();
    }

    /// Fill in the sixteen skill slots.
    pub fn calc_skills(&mut self, use_bonus: bool) {
        let mut ids: [u8; SKILL_POOL] = std::array::from_fn(|i| i as u8);
        let mut freq = [0u32; SKILL_SLOTS];

        let mut stream = Rc4Stream::new(self.table);
        // The running index carries over between the two shuffle passes.
        let mut s = 0usize;
        for _ in 0..2 {
            for j in 0..SKILL_POOL {
                let r = (stream.next_u16() % SKILL_POOL as u16) as usize;
                s = (s + r + ids[j] as usize) % SKILL_POOL;
                ids.swap(j, s);
            }
        }

        // Extra seat bonus for slots 14 and 15, unless revoked below.
        let mut seat_open = [true; 2];
        let mut last = None;
        for j in 0..SKILL_SLOTS {
            let off = 64 + j * 4;
            let q = min4(&self.base[off..off + 4]);
            let p = if use_bonus {
                min4(&self.bonus[off..off + 4])
            } else {
                q
            };

            if p > SKILL_THRESHOLD {
                if ids[j] < EMPTY_SKILL_ID {
                    freq[j] = (p - SKILL_THRESHOLD) as u32;
                }
                if q <= SKILL_THRESHOLD {
                    if j >= 14 {
                        seat_open[j - 14] = false;
                    }
                } else if ids[j] < EMPOWER_LIMIT {
                    last = Some(j);
                }
            }
        }

        if let Some(last) = last {
            if last >= 14 {
                seat_open[last - 14] = false;
            }
            freq[last] *= 2;
        }

        let info = self.source(use_bonus);
        for (k, slot) in [14usize, 15].into_iter().enumerate() {
            if freq[slot] > 0 && seat_open[k] {
                let seat = info[60 + 2 * k].min(info[61 + 2 * k]) as u32;
                freq[slot] += seat.min(freq[slot]);
            }
        }

        for (j, skill) in self.skills.iter_mut().enumerate() {
            *skill = Skill {
                id: ids[j],
                freq: freq[j],
            };
        }
    }
}
