use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

use crate::error::SvgShapeError;
use crate::path::PathCommand;

// Paint values (`fill`/`stroke`) are kept verbatim; resolving them into colors is
// left to `color::normalize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeRecord {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
    },
    Path {
        commands: Vec<PathCommand>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
    },
}

impl ShapeRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeRecord::Rect { .. } => "rect",
            ShapeRecord::Circle { .. } => "circle",
            ShapeRecord::Path { .. } => "path",
        }
    }

    pub fn fill(&self) -> Option<&str> {
        match self {
            ShapeRecord::Rect { fill, .. }
            | ShapeRecord::Circle { fill, .. }
            | ShapeRecord::Path { fill, .. } => fill.as_deref(),
        }
    }

    pub fn stroke(&self) -> Option<&str> {
        match self {
            ShapeRecord::Rect { stroke, .. }
            | ShapeRecord::Circle { stroke, .. }
            | ShapeRecord::Path { stroke, .. } => stroke.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
}

impl GradientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "gradient")]
pub struct GradientRecord {
    pub id: String,
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SvgDocument {
    pub shapes: Vec<ShapeRecord>,
    pub gradients: Vec<GradientRecord>,
}

impl SvgDocument {
    pub fn to_json(&self) -> Result<String, SvgShapeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SvgShapeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // Lowercase hex SHA-256 of the compact JSON form; stable key for dataset records.
    pub fn fingerprint(&self) -> Result<String, SvgShapeError> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        let digest = hasher.finalize();
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            let _ = write!(&mut out, "{:02x}", b);
        }
        Ok(out)
    }

    pub fn path_command_count(&self) -> usize {
        self.shapes
            .iter()
            .map(|shape| match shape {
                ShapeRecord::Path { commands, .. } => commands.len(),
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn sample() -> SvgDocument {
        SvgDocument {
            shapes: vec![
                ShapeRecord::Rect {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                    fill: Some("red".to_string()),
                    stroke: None,
                },
                ShapeRecord::Path {
                    commands: vec![
                        PathCommand::new('M', vec![1.0, 2.0]),
                        PathCommand::new('z', vec![]),
                    ],
                    fill: None,
                    stroke: Some("#000".to_string()),
                },
            ],
            gradients: vec![GradientRecord {
                id: "g1".to_string(),
                kind: GradientKind::Radial,
                stops: vec![GradientStop {
                    offset: "0%".to_string(),
                    color: String::new(),
                }],
            }],
        }
    }

    #[test]
    fn json_has_two_top_level_arrays() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        let obj = value.as_object().expect("object");
        assert_eq!(obj.len(), 2);
        assert!(obj["shapes"].is_array());
        assert!(obj["gradients"].is_array());
    }

    #[test]
    fn shapes_serialize_with_type_and_raw_paint() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(
            value["shapes"][0],
            json!({"type": "rect", "x": 0.0, "y": 0.0, "width": 10.0, "height": 10.0, "fill": "red"})
        );
        assert_eq!(
            value["shapes"][1],
            json!({
                "type": "path",
                "commands": [
                    {"command": "M", "params": [1.0, 2.0]},
                    {"command": "z", "params": []}
                ],
                "stroke": "#000"
            })
        );
    }

    #[test]
    fn gradients_serialize_with_kind_and_stops() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(
            value["gradients"][0],
            json!({
                "type": "gradient",
                "id": "g1",
                "kind": "radial",
                "stops": [{"offset": "0%", "color": ""}]
            })
        );
    }

    #[test]
    fn fingerprint_is_stable_hex_sha256() {
        let a = sample().fingerprint().unwrap();
        let b = sample().fingerprint().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, SvgDocument::default().fingerprint().unwrap());
    }

    #[test]
    fn counts_path_commands() {
        assert_eq!(sample().path_command_count(), 2);
        assert_eq!(sample().shapes[1].stroke(), Some("#000"));
        assert_eq!(sample().shapes[0].kind(), "rect");
    }
}
