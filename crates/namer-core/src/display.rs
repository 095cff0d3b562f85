//! Labels and chat-ready rendering for derived names.

use std::fmt;

use serde::Serialize;

use crate::engine::{Name, PROPERTY_COUNT, SKILL_POOL};

/// Version of the name engine, shown in replies.
pub const ENGINE_VERSION: &str = "3.3.2";

pub const PROPERTY_NAMES: [&str; PROPERTY_COUNT] = ["HP", "攻", "防", "速", "敏", "魔", "抗", "智"];

pub const SKILL_NAMES: [&str; SKILL_POOL] = [
    "火球", "冰冻", "雷击", "地裂", "吸血", "投毒", "连击", "会心", "瘟疫", "命轮", "狂暴", "魅惑",
    "加速", "减速", "诅咒", "治愈", "苏生", "净化", "铁壁", "蓄力", "聚气", "潜行", "血祭", "分身",
    "幻术", "防御", "守护", "反弹", "护符", "护盾", "反击", "吞噬", "亡灵", "垂死", "隐匿", "空技能",
    "空技能", "空技能", "空技能", "空技能",
];

const NO_SKILLS: &str = "无技能";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    pub label: &'static str,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkillEntry {
    pub id: u8,
    pub label: &'static str,
    pub freq: u32,
}

/// Structured result of one property + skill pass, ready for a formatter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayBlock {
    pub name: String,
    pub bonus: bool,
    pub properties: Vec<PropertyEntry>,
    pub skills: Vec<SkillEntry>,
}

pub fn skill_label(id: u8) -> &'static str {
    SKILL_NAMES.get(id as usize).copied().unwrap_or(SKILL_NAMES[SKILL_POOL - 1])
}

/// Run both calculation steps on `name` and collect the results.
pub fn render_attributes(name: &mut Name, use_bonus: bool) -> DisplayBlock {
    name.calc_properties(use_bonus);
    name.calc_skills(use_bonus);

    let properties = PROPERTY_NAMES
        .iter()
        .zip(name.properties())
        .map(|(&label, &value)| PropertyEntry { label, value })
        .collect();

    let skills = name
        .skills()
        .iter()
        .map(|s| SkillEntry {
            id: s.id,
            label: skill_label(s.id),
            freq: s.freq,
        })
        .collect();

    DisplayBlock {
        name: name.raw().to_string(),
        bonus: use_bonus,
        properties,
        skills,
    }
}

impl DisplayBlock {
    /// Skills that actually fire (non-zero frequency).
    pub fn active_skills(&self) -> impl Iterator<Item = &SkillEntry> {
        self.skills.iter().filter(|s| s.freq > 0)
    }
}

impl fmt::Display for DisplayBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;

        let props = self
            .properties
            .iter()
            .map(|p| format!("{} {}", p.label, p.value))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(f, "{props}")?;

        let skills = self
            .active_skills()
            .map(|s| format!("{} {}", s.label, s.freq))
            .collect::<Vec<_>>();
        if skills.is_empty() {
            write!(f, "{NO_SKILLS}")
        } else {
            write!(f, "{}", skills.join(", "))
        }
    }
}
