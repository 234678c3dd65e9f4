mod color;
mod debug;
mod error;
mod named_colors;
mod path;
mod perf;
#[cfg(feature = "python")]
mod python;
mod svg;
mod types;

pub use color::{Alpha, ColorLiteral, ColorValue, Component, normalize, normalize_str};
use debug::DebugLogger;
pub use error::SvgShapeError;
pub use path::{PathCommand, is_command_letter, tokenize};
use perf::PerfLogger;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use svg::{MarkupOptions, Trace};
pub use types::{GradientKind, GradientRecord, GradientStop, ShapeRecord, SvgDocument};

// Extracts shapes and gradients with default settings (no DTDs, no node limit,
// no logging).
pub fn extract(svg_xml: &str) -> Result<SvgDocument, SvgShapeError> {
    svg::extract_svg(svg_xml, MarkupOptions::default(), Trace::default())
}

pub fn extract_file(path: impl AsRef<Path>) -> Result<SvgDocument, SvgShapeError> {
    let text = std::fs::read_to_string(path)?;
    extract(&text)
}

// Configured extractor. Cheap to share across threads; the optional loggers
// serialize their own writes.
pub struct SvgShape {
    markup: MarkupOptions,
    debug: Option<DebugLogger>,
    perf: Option<PerfLogger>,
}

#[derive(Clone)]
pub struct SvgShapeBuilder {
    allow_dtd: bool,
    nodes_limit: u32,
    debug_path: Option<PathBuf>,
    perf_path: Option<PathBuf>,
}

impl SvgShape {
    pub fn builder() -> SvgShapeBuilder {
        SvgShapeBuilder::new()
    }

    pub fn extract(&self, svg_xml: &str) -> Result<SvgDocument, SvgShapeError> {
        svg::extract_svg(svg_xml, self.markup, self.trace(None))
    }

    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<SvgDocument, SvgShapeError> {
        let text = std::fs::read_to_string(path)?;
        self.extract(&text)
    }

    // Extracts every document in parallel. Results keep input order, and each
    // document succeeds or fails on its own; log records carry the input index
    // as `doc_id`.
    pub fn extract_batch<S>(&self, documents: &[S]) -> Vec<Result<SvgDocument, SvgShapeError>>
    where
        S: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .enumerate()
            .map(|(idx, svg_xml)| {
                svg::extract_svg(svg_xml.as_ref(), self.markup, self.trace(Some(idx)))
            })
            .collect()
    }

    // Writes the debug counter summary and flushes both logs.
    pub fn flush(&self) {
        if let Some(debug) = &self.debug {
            debug.emit_summary("svgshape");
            debug.flush();
        }
        if let Some(perf) = &self.perf {
            perf.flush();
        }
    }

    fn trace(&self, doc_id: Option<usize>) -> Trace<'_> {
        Trace {
            debug: self.debug.as_ref(),
            perf: self.perf.as_ref(),
            doc_id,
        }
    }
}

impl Default for SvgShape {
    fn default() -> Self {
        Self {
            markup: MarkupOptions::default(),
            debug: None,
            perf: None,
        }
    }
}

impl SvgShapeBuilder {
    pub fn new() -> Self {
        let markup = MarkupOptions::default();
        Self {
            allow_dtd: markup.allow_dtd,
            nodes_limit: markup.nodes_limit,
            debug_path: None,
            perf_path: None,
        }
    }

    // Documents with a <!DOCTYPE> are rejected as malformed unless enabled.
    pub fn allow_dtd(mut self, enabled: bool) -> Self {
        self.allow_dtd = enabled;
        self
    }

    pub fn nodes_limit(mut self, limit: u32) -> Self {
        self.nodes_limit = limit.max(1);
        self
    }

    pub fn debug_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_path = Some(path.into());
        self
    }

    pub fn perf_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.perf_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<SvgShape, SvgShapeError> {
        let debug = match self.debug_path {
            Some(path) => Some(DebugLogger::new(path)?),
            None => None,
        };
        let perf = match self.perf_path {
            Some(path) => Some(PerfLogger::new(path)?),
            None => None,
        };
        Ok(SvgShape {
            markup: MarkupOptions {
                allow_dtd: self.allow_dtd,
                nodes_limit: self.nodes_limit,
            },
            debug,
            perf,
        })
    }
}

impl Default for SvgShapeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
