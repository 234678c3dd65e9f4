use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::SvgShapeError;
use crate::types::{GradientRecord, ShapeRecord};

// JSON-lines trace of extraction events. Cloning shares the same file.
#[derive(Clone)]
pub(crate) struct DebugLogger {
    inner: Arc<Mutex<DebugState>>,
}

struct DebugState {
    writer: BufWriter<File>,
    counters: HashMap<String, u64>,
}

impl DebugLogger {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(DebugState {
                writer: BufWriter::new(file),
                counters: HashMap::new(),
            })),
        })
    }

    pub fn log_json(&self, value: &Value) {
        if let Ok(mut state) = self.inner.lock() {
            let _ = writeln!(state.writer, "{value}");
        }
    }

    pub fn increment(&self, key: &str, amount: u64) {
        if let Ok(mut state) = self.inner.lock() {
            let entry = state.counters.entry(key.to_string()).or_insert(0);
            *entry = entry.saturating_add(amount);
        }
    }

    pub fn log_shape(&self, doc_id: Option<usize>, index: usize, shape: &ShapeRecord) {
        self.increment(&format!("shape.{}", shape.kind()), 1);
        self.log_json(&json!({
            "type": "svg.shape",
            "doc_id": doc_id,
            "index": index,
            "kind": shape.kind(),
            "fill": shape.fill(),
            "stroke": shape.stroke(),
        }));
    }

    pub fn log_gradient(&self, doc_id: Option<usize>, index: usize, gradient: &GradientRecord) {
        self.increment(&format!("gradient.{}", gradient.kind.as_str()), 1);
        self.log_json(&json!({
            "type": "svg.gradient",
            "doc_id": doc_id,
            "index": index,
            "id": gradient.id,
            "kind": gradient.kind.as_str(),
            "stops": gradient.stops.len(),
        }));
    }

    pub fn log_error(&self, doc_id: Option<usize>, err: &SvgShapeError, pos: Option<(u32, u32)>) {
        self.increment(&format!("error.{}", err.kind()), 1);
        let mut record = json!({
            "type": "svg.error",
            "doc_id": doc_id,
            "kind": err.kind(),
            "message": err.to_string(),
        });
        if let Some((row, col)) = pos {
            record["row"] = json!(row);
            record["col"] = json!(col);
        }
        self.log_json(&record);
    }

    pub fn emit_summary(&self, context: &str) {
        if let Ok(mut state) = self.inner.lock() {
            let counts: serde_json::Map<String, Value> = {
                let mut counters: Vec<(String, u64)> = state.counters.drain().collect();
                counters.sort_by(|a, b| a.0.cmp(&b.0));
                counters
                    .into_iter()
                    .map(|(key, value)| (key, json!(value)))
                    .collect()
            };
            let record = json!({
                "type": "debug.summary",
                "context": context,
                "counts": counts,
            });
            let _ = writeln!(state.writer, "{record}");
        }
    }

    pub fn flush(&self) {
        if let Ok(mut state) = self.inner.lock() {
            let _ = state.writer.flush();
        }
    }
}
