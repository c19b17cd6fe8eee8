//! Node-name map (`<index>:<name>` per line) and task-key resolution.

use crate::error::ProfileError;
use crate::model::{AggregateReport, TaskKey};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// task_id -> human-readable node name.
pub type NodeMap = BTreeMap<u64, String>;

pub fn load_node_map(path: &Path) -> anyhow::Result<NodeMap> {
    let text = fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
    parse_node_map(&text, &path.display().to_string())
}

/// Parse node-map text. The line is split at the first ':', so names may
/// themselves contain ':'. A repeated index overwrites the earlier entry.
pub fn parse_node_map(text: &str, origin: &str) -> anyhow::Result<NodeMap> {
    let re = Regex::new(r"^\s*([^:]*?)\s*:\s*(.*?)\s*$")?;

    let err = |line: usize, reason: &'static str, text: &str| ProfileError::NodeMap {
        origin: origin.to_string(),
        line,
        reason,
        text: text.to_string(),
    };

    let mut out = NodeMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        if line.trim().is_empty() {
            continue;
        }

        let caps = re
            .captures(line)
            .ok_or_else(|| err(lno, "expected <index>:<name>", line))?;
        let index: u64 = caps[1]
            .parse()
            .map_err(|_| err(lno, "index is not an integer", line))?;
        let name = &caps[2];
        if name.is_empty() {
            return Err(err(lno, "empty name", line).into());
        }

        if let Some(prev) = out.insert(index, name.to_string()) {
            tracing::debug!(origin, index, %prev, %name, "node map index repeated, keeping last");
        }
    }

    Ok(out)
}

/// Replace numeric task keys with their mapped names.
///
/// Ids without a mapping keep their numeric key. Entries are applied in
/// ascending id order; when a name is already taken by an earlier entry the
/// later task keeps its numeric key. Returns the number of renamed entries.
///
/// Collisions are checked on the written key, so a name such as `"2"` is
/// refused while task 2 still sits under its numeric id.
pub fn resolve_task_names(report: &mut AggregateReport, names: &NodeMap) -> usize {
    let mut taken: BTreeSet<String> = report.task_stats.keys().map(TaskKey::to_string).collect();

    let mut renamed = 0;
    for (id, name) in names {
        let key = TaskKey::NumericId(*id);
        if !report.task_stats.contains_key(&key) {
            continue;
        }
        if taken.contains(name) {
            tracing::warn!(
                task_id = *id,
                %name,
                "node name already used by another task, keeping numeric id"
            );
            continue;
        }
        if let Some(stats) = report.task_stats.remove(&key) {
            taken.remove(&key.to_string());
            report.task_stats.insert(TaskKey::Name(name.clone()), stats);
            taken.insert(name.clone());
            renamed += 1;
        }
    }

    renamed
}
