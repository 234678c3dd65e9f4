use serde_json::json;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct PerfLogger {
    inner: Arc<Mutex<PerfState>>,
}

struct PerfState {
    writer: BufWriter<File>,
    path: PathBuf,
    span_totals: HashMap<String, f64>,
    span_counts: HashMap<String, u64>,
    count_totals: HashMap<String, u64>,
}

impl PerfLogger {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(PerfState {
                writer: BufWriter::new(file),
                path,
                span_totals: HashMap::new(),
                span_counts: HashMap::new(),
                count_totals: HashMap::new(),
            })),
        })
    }

    pub fn log_span_ms(&self, name: &str, doc_id: Option<usize>, ms: f64) {
        let record = json!({
            "type": "perf.span",
            "name": name,
            "doc_id": doc_id,
            "unit": "ms",
            "ms": (ms * 1000.0).round() / 1000.0,
        });
        if let Ok(mut state) = self.inner.lock() {
            *state.span_totals.entry(name.to_string()).or_insert(0.0) += ms;
            let entry = state.span_counts.entry(name.to_string()).or_insert(0);
            *entry = entry.saturating_add(1);
            let _ = writeln!(state.writer, "{record}");
        }
    }

    pub fn log_counts(&self, name: &str, doc_id: Option<usize>, counts: &[(&str, u64)]) {
        let values: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(key, value)| (key.to_string(), json!(value)))
            .collect();
        let record = json!({
            "type": "perf.counts",
            "name": name,
            "doc_id": doc_id,
            "counts": values,
        });
        if let Ok(mut state) = self.inner.lock() {
            for (key, value) in counts {
                let full_key = format!("{name}.{key}");
                let entry = state.count_totals.entry(full_key).or_insert(0);
                *entry = entry.saturating_add(*value);
            }
            let _ = writeln!(state.writer, "{record}");
        }
    }

    pub fn flush(&self) {
        if let Ok(mut state) = self.inner.lock() {
            let _ = state.writer.flush();
        }
    }
}

// Totals are written to `<stem>_hot.log` next to the main log when the last handle drops.
impl Drop for PerfState {
    fn drop(&mut self) {
        let _ = self.writer.flush();
        let Ok(file) = File::create(hot_path_for(&self.path)) else {
            return;
        };
        let mut writer = BufWriter::new(file);

        let mut spans: Vec<(&String, &f64)> = self.span_totals.iter().collect();
        spans.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (rank, (name, ms)) in spans.into_iter().enumerate() {
            let count = *self.span_counts.get(name).unwrap_or(&1);
            let avg = if count == 0 { 0.0 } else { ms / count as f64 };
            let record = json!({
                "type": "perf.hot.span",
                "rank": rank + 1,
                "name": name,
                "unit": "ms",
                "ms": ms,
                "count": count,
                "avg_ms": avg,
            });
            let _ = writeln!(writer, "{record}");
        }

        let mut counts: Vec<(&String, &u64)> = self.count_totals.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (rank, (name, value)) in counts.into_iter().enumerate() {
            let record = json!({
                "type": "perf.hot.count",
                "rank": rank + 1,
                "name": name,
                "value": value,
            });
            let _ = writeln!(writer, "{record}");
        }
        let _ = writer.flush();
    }
}

fn hot_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("svgshape_perf.log");
    let stem = file_name
        .rsplit_once('.')
        .map(|(s, _)| s)
        .unwrap_or(file_name);
    path.with_file_name(format!("{stem}_hot.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn hot_path_sits_next_to_log() {
        assert_eq!(
            hot_path_for(Path::new("/tmp/run/perf.jsonl")),
            PathBuf::from("/tmp/run/perf_hot.log")
        );
        assert_eq!(
            hot_path_for(Path::new("trace")),
            PathBuf::from("trace_hot.log")
        );
    }

    #[test]
    fn totals_are_written_on_drop() {
        let path = std::env::temp_dir().join(format!("svgshape_perf_{}.log", std::process::id()));
        let hot = hot_path_for(&path);
        {
            let logger = PerfLogger::new(&path).expect("create log");
            logger.log_span_ms("svg.parse", Some(0), 1.5);
            logger.log_span_ms("svg.parse", Some(1), 0.5);
            logger.log_counts("svg.extract", Some(0), &[("shapes", 2), ("gradients", 1)]);
            logger.log_counts("svg.extract", Some(1), &[("shapes", 3)]);
        }

        let lines = std::fs::read_to_string(&path).expect("read log");
        assert_eq!(lines.lines().count(), 4);
        let hot_text = std::fs::read_to_string(&hot).expect("read hot log");
        let hot_records: Vec<Value> = hot_text
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_file(&hot);

        assert_eq!(hot_records[0]["type"], "perf.hot.span");
        assert_eq!(hot_records[0]["count"], 2);
        assert_eq!(hot_records[0]["ms"], 2.0);
        assert_eq!(hot_records[1]["name"], "svg.extract.shapes");
        assert_eq!(hot_records[1]["value"], 5);
        assert_eq!(hot_records[2]["name"], "svg.extract.gradients");
    }
}
