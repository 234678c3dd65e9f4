use std::fmt;

#[derive(Debug)]
pub enum SvgShapeError {
    InvalidSyntax(String),
    UnsupportedFormat(String),
    MissingAttribute { element: String, attribute: String },
    MalformedMarkup(String),
    Serialize(String),
    Io(std::io::Error),
}

impl SvgShapeError {
    pub(crate) fn missing(element: &str, attribute: &str) -> Self {
        SvgShapeError::MissingAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
        }
    }

    // Short machine-readable tag, used in trace records.
    pub fn kind(&self) -> &'static str {
        match self {
            SvgShapeError::InvalidSyntax(_) => "invalid_syntax",
            SvgShapeError::UnsupportedFormat(_) => "unsupported_format",
            SvgShapeError::MissingAttribute { .. } => "missing_attribute",
            SvgShapeError::MalformedMarkup(_) => "malformed_markup",
            SvgShapeError::Serialize(_) => "serialize",
            SvgShapeError::Io(_) => "io",
        }
    }
}

impl fmt::Display for SvgShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgShapeError::InvalidSyntax(message) => {
                write!(f, "invalid color syntax: {}", message)
            }
            SvgShapeError::UnsupportedFormat(message) => {
                write!(f, "unsupported color format: {}", message)
            }
            SvgShapeError::MissingAttribute { element, attribute } => write!(
                f,
                "<{}> is missing a valid '{}' attribute",
                element, attribute
            ),
            SvgShapeError::MalformedMarkup(message) => {
                write!(f, "malformed markup: {}", message)
            }
            SvgShapeError::Serialize(message) => write!(f, "serialization error: {}", message),
            SvgShapeError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for SvgShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgShapeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SvgShapeError {
    fn from(value: std::io::Error) -> Self {
        SvgShapeError::Io(value)
    }
}

impl From<roxmltree::Error> for SvgShapeError {
    fn from(value: roxmltree::Error) -> Self {
        SvgShapeError::MalformedMarkup(value.to_string())
    }
}

impl From<serde_json::Error> for SvgShapeError {
    fn from(value: serde_json::Error) -> Self {
        SvgShapeError::Serialize(value.to_string())
    }
}
