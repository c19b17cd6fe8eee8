use crate::error::ProfileError;
use crate::log::row::{JobRecord, ProfileLog, WaveRecord};
use std::fs;
use std::path::Path;

/// Parse a profiling log file into wave and job tables.
///
/// Expected rows (comma-separated, spaces around fields allowed):
/// W, wave_num, duration
/// J, task_id, job_id, thread_id, sched_duration, run_duration, wait_duration
///
/// Example:
/// J, 3, 117, 2, 14, 250, 9
pub fn parse_log_file(path: &Path) -> anyhow::Result<ProfileLog> {
    let text = fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
    let log = parse_log_str(&text, &path.display().to_string())?;
    Ok(log)
}

/// Parse log text. `origin` names the source in error messages.
///
/// Rows tagged with anything other than `W` or `J` are skipped. Fields that
/// are empty or whitespace-only (e.g. after a trailing comma) are dropped
/// before the row width is checked.
pub fn parse_log_str(text: &str, origin: &str) -> Result<ProfileLog, ProfileError> {
    let mut out = ProfileLog::default();
    let mut skipped = 0usize;
    let mut fields: Vec<u64> = Vec::with_capacity(JobRecord::FIELDS);

    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let mut parts = line.split(',');
        let tag = match parts.next().map(str::trim) {
            Some("W") => 'W',
            Some("J") => 'J',
            _ => {
                skipped += 1;
                continue;
            }
        };

        fields.clear();
        for (idx, part) in parts.enumerate() {
            let p = part.trim();
            if p.is_empty() {
                continue;
            }
            let value = p.parse::<u64>().map_err(|_| ProfileError::Parse {
                origin: origin.to_string(),
                line: lno,
                field: idx + 1,
                value: p.to_string(),
            })?;
            fields.push(value);
        }

        let expected = match tag {
            'W' => WaveRecord::FIELDS,
            _ => JobRecord::FIELDS,
        };
        if fields.len() != expected {
            return Err(ProfileError::RowWidth {
                origin: origin.to_string(),
                line: lno,
                tag,
                expected,
                found: fields.len(),
            });
        }

        match tag {
            'W' => out.waves.push(WaveRecord::from_fields(&fields)),
            _ => out.jobs.push(JobRecord::from_fields(&fields)),
        }
    }

    if skipped > 0 {
        tracing::debug!(origin, skipped, "ignored rows with unknown tags");
    }

    Ok(out)
}
