//! Diagram element data model.
//!
//! Elements arrive as an already-parsed JSON payload: a flat array of
//! objects, or an array of such arrays when the producer emitted grouped
//! alternatives. Each object carries a `"type"` tag plus kind-dependent
//! optional fields. Unknown fields (`id`, `version`, `seed`, ...) are
//! accepted and ignored.

use serde::{Deserialize, Serialize};

/// The five drawable element kinds.
///
/// Painting dispatches on this tag with an exhaustive match, so adding a
/// kind is a compile-time-checked extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Text,
}

/// One drawable diagram primitive.
///
/// Geometry is fully determined by `kind` and the fields below; elements
/// never reference each other and paint order is input-list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    /// Horizontal extent from the origin (rectangle/ellipse).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Vertical extent from the origin (rectangle/ellipse).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Vertex offsets relative to the origin (line/arrow). The first
    /// vertex is implicitly the origin itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<[f64; 2]>>,
    /// Text content (text elements only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Stroke color as `#rrggbb`; opaque black when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Fill color as `#rrggbb`; no fill when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Stroke width in element units, scaled with the diagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Font size in element units; base default is 16.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family code: 1 sans-serif, 2 fixed-width, 3 serif;
    /// anything else falls back to sans-serif.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<i64>,
}

impl DiagramElement {
    /// Create a bare element of the given kind at an origin.
    pub fn new(kind: ElementKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width: None,
            height: None,
            points: None,
            text: None,
            stroke_color: None,
            background_color: None,
            stroke_width: None,
            font_size: None,
            font_family: None,
        }
    }

    /// A rectangle with the given origin and extents.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut el = Self::new(ElementKind::Rectangle, x, y);
        el.width = Some(width);
        el.height = Some(height);
        el
    }

    /// An ellipse inscribed in the box at the given origin and extents.
    pub fn ellipse(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut el = Self::new(ElementKind::Ellipse, x, y);
        el.width = Some(width);
        el.height = Some(height);
        el
    }

    /// A polyline through the given origin-relative points.
    pub fn line(x: f64, y: f64, points: Vec<[f64; 2]>) -> Self {
        let mut el = Self::new(ElementKind::Line, x, y);
        el.points = Some(points);
        el
    }

    /// An arrow along the given origin-relative points.
    pub fn arrow(x: f64, y: f64, points: Vec<[f64; 2]>) -> Self {
        let mut el = Self::new(ElementKind::Arrow, x, y);
        el.points = Some(points);
        el
    }

    /// A text label anchored at the given origin.
    pub fn text(x: f64, y: f64, text: impl Into<String>) -> Self {
        let mut el = Self::new(ElementKind::Text, x, y);
        el.text = Some(text.into());
        el
    }
}

/// Caller-supplied element list: flat, or grouped one level deep.
///
/// The flat/nested ambiguity exists on the wire, so it is resolved here at
/// the API boundary with an explicit depth probe (serde tries the nested
/// shape first); everything past [`ElementInput::flatten`] operates on the
/// flat form only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementInput {
    Nested(Vec<Vec<DiagramElement>>),
    Flat(Vec<DiagramElement>),
}

impl ElementInput {
    /// Flatten grouped input into paint order; flat input is unchanged.
    pub fn flatten(&self) -> Vec<DiagramElement> {
        match self {
            Self::Flat(elements) => elements.clone(),
            Self::Nested(groups) => groups.iter().flatten().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(elements) => elements.is_empty(),
            Self::Nested(groups) => groups.iter().all(Vec::is_empty),
        }
    }
}

impl From<Vec<DiagramElement>> for ElementInput {
    fn from(elements: Vec<DiagramElement>) -> Self {
        Self::Flat(elements)
    }
}

impl From<Vec<Vec<DiagramElement>>> for ElementInput {
    fn from(groups: Vec<Vec<DiagramElement>>) -> Self {
        Self::Nested(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payload_element() {
        let json = r##"{
            "type": "rectangle",
            "x": 10, "y": 20,
            "width": 100, "height": 50,
            "strokeColor": "#1e1e1e",
            "backgroundColor": "#ffc9c9",
            "strokeWidth": 2,
            "id": "abc", "version": 3, "seed": 12345
        }"##;
        let el: DiagramElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.kind, ElementKind::Rectangle);
        assert_eq!(el.x, 10.0);
        assert_eq!(el.width, Some(100.0));
        assert_eq!(el.stroke_color.as_deref(), Some("#1e1e1e"));
        assert_eq!(el.background_color.as_deref(), Some("#ffc9c9"));
        assert_eq!(el.stroke_width, Some(2.0));
    }

    #[test]
    fn test_deserialize_rejects_unknown_kind() {
        let json = r#"{"type": "diamond", "x": 0, "y": 0}"#;
        assert!(serde_json::from_str::<DiagramElement>(json).is_err());
    }

    #[test]
    fn test_deserialize_line_points() {
        let json = r#"{"type": "arrow", "x": 5, "y": 5, "points": [[0, 0], [100, 40]]}"#;
        let el: DiagramElement = serde_json::from_str(json).unwrap();
        assert_eq!(el.kind, ElementKind::Arrow);
        assert_eq!(el.points, Some(vec![[0.0, 0.0], [100.0, 40.0]]));
    }

    #[test]
    fn test_input_depth_probe_flat() {
        let json = r#"[{"type": "rectangle", "x": 0, "y": 0, "width": 10, "height": 10}]"#;
        let input: ElementInput = serde_json::from_str(json).unwrap();
        assert!(matches!(input, ElementInput::Flat(_)));
        assert_eq!(input.flatten().len(), 1);
    }

    #[test]
    fn test_input_depth_probe_nested() {
        let json = r#"[[{"type": "text", "x": 0, "y": 0, "text": "a"}],
                       [{"type": "text", "x": 1, "y": 1, "text": "b"}]]"#;
        let input: ElementInput = serde_json::from_str(json).unwrap();
        assert!(matches!(input, ElementInput::Nested(_)));
        let flat = input.flatten();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].text.as_deref(), Some("a"));
        assert_eq!(flat[1].text.as_deref(), Some("b"));
    }

    #[test]
    fn test_nested_flatten_preserves_paint_order() {
        let groups = vec![
            vec![DiagramElement::rectangle(0.0, 0.0, 1.0, 1.0)],
            vec![
                DiagramElement::text(2.0, 2.0, "x"),
                DiagramElement::ellipse(3.0, 3.0, 1.0, 1.0),
            ],
        ];
        let flat = ElementInput::from(groups).flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].kind, ElementKind::Rectangle);
        assert_eq!(flat[1].kind, ElementKind::Text);
        assert_eq!(flat[2].kind, ElementKind::Ellipse);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(ElementInput::Flat(Vec::new()).is_empty());
        assert!(ElementInput::Nested(vec![Vec::new(), Vec::new()]).is_empty());
        assert!(!ElementInput::from(vec![DiagramElement::text(0.0, 0.0, "t")]).is_empty());
    }
}
