use std::{fmt, str::FromStr};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use crate::errors::GeometryError;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// 2D Point
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}


/// Straight walkway between two points
/// The cost of an edge is always derived from its segment, never stored
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {

    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// Text encoding is `{(x1, y1), (x2, y2)}`
impl FromStr for Segment {
    type Err = GeometryError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let inner = text.trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| GeometryError::malformed(text, "expected a `{...}` wrapped point list"))?;

        // points are separated by "),(" with optional whitespace after the comma
        let points = inner.split("),")
            .map(|group| parse_point(text, group))
            .collect::<Result<Vec<Point>, GeometryError>>()?;

        match points.as_slice() {
            [start, end] => Ok(Segment::new(*start, *end)),
            _ => Err(GeometryError::malformed(
                text,
                format!("expected exactly two points, found {}", points.len()),
            )),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{({}, {}), ({}, {})}}",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}


/// Parse a single `(x, y)` group, parentheses are optional
fn parse_point(text: &str, group: &str) -> Result<Point, GeometryError> {
    let cleaned: String = group.chars().filter(|c| *c != '(' && *c != ')').collect();

    let components: Vec<&str> = cleaned.split(',').map(str::trim).collect();
    let [x, y] = components.as_slice() else {
        return Err(GeometryError::malformed(
            text,
            format!("point `{}` must have two components", group.trim()),
        ));
    };

    Ok(Point::new(parse_coordinate(text, x)?, parse_coordinate(text, y)?))
}

fn parse_coordinate(text: &str, value: &str) -> Result<f64, GeometryError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(GeometryError::malformed(text, format!("coordinate `{value}` is not finite"))),
        Err(_) => Err(GeometryError::malformed(text, format!("coordinate `{value}` is not a number"))),
    }
}
