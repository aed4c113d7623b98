//! Hit set combination / 命中集合运算
//!
//! The four modes are the complete set of ways a new hit list merges with the stored one.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How new hits merge with stored hits / 合并模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Replace stored hits (default) / 替换
    Load,
    /// New hits first, then stored hits not already present / 追加
    Add,
    /// Stored hits minus new hits / 移除
    Remove,
    /// Stored hits also in new hits / 交集
    Intersect,
}

impl From<&str> for CombineMode {
    fn from(s: &str) -> Self {
        match s {
            "add" => CombineMode::Add,
            "remove" => CombineMode::Remove,
            "intersect" => CombineMode::Intersect,
            _ => CombineMode::Load,
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CombineMode::Load => "load",
            CombineMode::Add => "add",
            CombineMode::Remove => "remove",
            CombineMode::Intersect => "intersect",
        };
        f.write_str(name)
    }
}

impl Default for CombineMode {
    fn default() -> Self {
        CombineMode::Load
    }
}

/// Merge `new` into `stored` / 合并命中列表
///
/// The result never holds duplicates and keeps first-seen order.
pub fn combine(stored: &[String], new: &[String], mode: CombineMode) -> Vec<String> {
    match mode {
        CombineMode::Load => dedup(new.iter()),
        CombineMode::Add => dedup(new.iter().chain(stored.iter())),
        CombineMode::Remove => {
            let new: HashSet<&String> = new.iter().collect();
            dedup(stored.iter().filter(|hit| !new.contains(hit)))
        }
        CombineMode::Intersect => {
            let new: HashSet<&String> = new.iter().collect();
            dedup(stored.iter().filter(|hit| new.contains(hit)))
        }
    }
}

fn dedup<'a>(hits: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    hits.filter(|hit| seen.insert(hit.as_str()))
        .cloned()
        .collect()
}
