use std::time::Instant;

use crate::debug::DebugLogger;
use crate::error::SvgShapeError;
use crate::path::tokenize;
use crate::perf::PerfLogger;
use crate::types::{GradientKind, GradientRecord, GradientStop, ShapeRecord, SvgDocument};

// Shape/gradient extractor for a small SVG subset.
//
// Covered:
// - <rect>, <circle>, <path> (d="..." split into raw commands)
// - <linearGradient>, <radialGradient> with direct <stop> children
// - elements at any depth, in document order, matched by local name (any prefix)
//
// Ignored: every other element (groups are walked through, not recorded), styles,
// transforms, presentation inheritance. Paint attributes are copied verbatim.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkupOptions {
    pub allow_dtd: bool,
    pub nodes_limit: u32,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            allow_dtd: false,
            nodes_limit: u32::MAX,
        }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Trace<'a> {
    pub debug: Option<&'a DebugLogger>,
    pub perf: Option<&'a PerfLogger>,
    pub doc_id: Option<usize>,
}

pub(crate) fn extract_svg(
    svg_xml: &str,
    options: MarkupOptions,
    trace: Trace<'_>,
) -> Result<SvgDocument, SvgShapeError> {
    let parse_start = Instant::now();
    let mut opt = roxmltree::ParsingOptions::default();
    opt.allow_dtd = options.allow_dtd;
    opt.nodes_limit = options.nodes_limit;
    let doc = match roxmltree::Document::parse_with_options(svg_xml, opt) {
        Ok(doc) => doc,
        Err(err) => {
            let err = SvgShapeError::from(err);
            if let Some(debug) = trace.debug {
                debug.log_error(trace.doc_id, &err, None);
            }
            return Err(err);
        }
    };
    if let Some(perf) = trace.perf {
        perf.log_span_ms(
            "svg.parse",
            trace.doc_id,
            parse_start.elapsed().as_secs_f64() * 1000.0,
        );
    }

    let walk_start = Instant::now();
    let mut out = SvgDocument::default();
    for node in doc.descendants().filter(|n| n.is_element()) {
        let name = node.tag_name().name();
        let step = match name {
            "rect" => rect_record(node).map(|shape| out.shapes.push(shape)),
            "circle" => circle_record(node).map(|shape| out.shapes.push(shape)),
            "path" => path_record(node).map(|shape| out.shapes.push(shape)),
            "linearGradient" => gradient_record(node, GradientKind::Linear)
                .map(|gradient| out.gradients.push(gradient)),
            "radialGradient" => gradient_record(node, GradientKind::Radial)
                .map(|gradient| out.gradients.push(gradient)),
            _ => continue,
        };
        if let Err(err) = step {
            if let Some(debug) = trace.debug {
                let pos = doc.text_pos_at(node.range().start);
                debug.log_error(trace.doc_id, &err, Some((pos.row, pos.col)));
            }
            return Err(err);
        }
        if let Some(debug) = trace.debug {
            log_last_record(debug, trace.doc_id, name, &out);
        }
    }

    if let Some(perf) = trace.perf {
        perf.log_span_ms(
            "svg.walk",
            trace.doc_id,
            walk_start.elapsed().as_secs_f64() * 1000.0,
        );
        perf.log_counts(
            "svg.extract",
            trace.doc_id,
            &[
                ("shapes", out.shapes.len() as u64),
                ("gradients", out.gradients.len() as u64),
                ("path_commands", out.path_command_count() as u64),
            ],
        );
    }
    Ok(out)
}

fn log_last_record(debug: &DebugLogger, doc_id: Option<usize>, name: &str, doc: &SvgDocument) {
    match name {
        "linearGradient" | "radialGradient" => {
            if let Some(gradient) = doc.gradients.last() {
                debug.log_gradient(doc_id, doc.gradients.len() - 1, gradient);
            }
        }
        _ => {
            if let Some(shape) = doc.shapes.last() {
                debug.log_shape(doc_id, doc.shapes.len() - 1, shape);
            }
        }
    }
}

// Unprefixed attribute, or one qualified with the element's own namespace
// (`<svg:rect svg:x="..."/>`).
fn attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).or_else(|| {
        let ns = node.tag_name().namespace()?;
        node.attribute((ns, name))
    })
}

fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn required_number(node: roxmltree::Node<'_, '_>, name: &str) -> Result<f64, SvgShapeError> {
    attr(node, name)
        .and_then(parse_number)
        .ok_or_else(|| SvgShapeError::missing(node.tag_name().name(), name))
}

fn required_text<'a>(
    node: roxmltree::Node<'a, '_>,
    name: &str,
) -> Result<&'a str, SvgShapeError> {
    attr(node, name).ok_or_else(|| SvgShapeError::missing(node.tag_name().name(), name))
}

fn paint(node: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    attr(node, name).map(str::to_string)
}

fn rect_record(node: roxmltree::Node<'_, '_>) -> Result<ShapeRecord, SvgShapeError> {
    Ok(ShapeRecord::Rect {
        x: required_number(node, "x")?,
        y: required_number(node, "y")?,
        width: required_number(node, "width")?,
        height: required_number(node, "height")?,
        fill: paint(node, "fill"),
        stroke: paint(node, "stroke"),
    })
}

fn circle_record(node: roxmltree::Node<'_, '_>) -> Result<ShapeRecord, SvgShapeError> {
    Ok(ShapeRecord::Circle {
        cx: required_number(node, "cx")?,
        cy: required_number(node, "cy")?,
        r: required_number(node, "r")?,
        fill: paint(node, "fill"),
        stroke: paint(node, "stroke"),
    })
}

fn path_record(node: roxmltree::Node<'_, '_>) -> Result<ShapeRecord, SvgShapeError> {
    let d = required_text(node, "d")?;
    Ok(ShapeRecord::Path {
        commands: tokenize(d),
        fill: paint(node, "fill"),
        stroke: paint(node, "stroke"),
    })
}

fn gradient_record(
    node: roxmltree::Node<'_, '_>,
    kind: GradientKind,
) -> Result<GradientRecord, SvgShapeError> {
    let id = required_text(node, "id")?.to_string();
    let ns = node.tag_name().namespace();
    let mut stops = Vec::new();
    // Direct children only; a stop must share the gradient's namespace.
    for stop in node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "stop")
        .filter(|n| n.tag_name().namespace() == ns)
    {
        stops.push(GradientStop {
            offset: required_text(stop, "offset")?.to_string(),
            color: attr(stop, "stop-color").unwrap_or("").to_string(),
        });
    }
    Ok(GradientRecord { id, kind, stops })
}
