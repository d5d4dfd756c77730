//! # Coloring Templates
//!
//! Static line-art pages on a 100×100 canvas (origin top-left, y grows down).
//! Each page is an ordered list of regions; later regions sit on top of
//! earlier ones, so hit testing walks the list backwards.

use crate::core::model::TemplateId;

pub type Point = (f64, f64);

/// How close (in canvas units) a pointer must be to count as touching a stroke.
pub const STROKE_TOLERANCE: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Polygon(&'static [Point]),
    /// Open polyline segments, e.g. whiskers.
    Strokes(&'static [(Point, Point)]),
}

/// Fill a region has before it is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFill {
    /// Blank paper: only the outline is drawn.
    Paper,
    /// Solid ink (eyes, noses).
    Ink,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub shape: Shape,
    pub base: BaseFill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub regions: &'static [Region],
}

impl Shape {
    pub fn contains(&self, (x, y): Point) -> bool {
        match *self {
            Shape::Circle { cx, cy, r } => (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
            Shape::Ellipse { cx, cy, rx, ry } => {
                ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2) <= 1.0
            }
            Shape::Polygon(points) => point_in_polygon((x, y), points),
            Shape::Strokes(segments) => segments
                .iter()
                .any(|&(a, b)| distance_to_segment((x, y), a, b) <= STROKE_TOLERANCE),
        }
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Shape::Circle { cx, cy, r } => (cx - r, cy - r, cx + r, cy + r),
            Shape::Ellipse { cx, cy, rx, ry } => (cx - rx, cy - ry, cx + rx, cy + ry),
            Shape::Polygon(points) => bounds_of(points.iter().copied()),
            Shape::Strokes(segments) => {
                bounds_of(segments.iter().flat_map(|&(a, b)| [a, b]))
            }
        }
    }

    /// Outline as connected points (closed for areas, per-segment for strokes).
    pub fn outline(&self) -> Vec<(Point, Point)> {
        match *self {
            Shape::Circle { cx, cy, r } => ring(cx, cy, r, r),
            Shape::Ellipse { cx, cy, rx, ry } => ring(cx, cy, rx, ry),
            Shape::Polygon(points) => points
                .iter()
                .zip(points.iter().cycle().skip(1))
                .map(|(&a, &b)| (a, b))
                .collect(),
            Shape::Strokes(segments) => segments.to_vec(),
        }
    }
}

fn ring(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<(Point, Point)> {
    const STEPS: usize = 24;
    let at = |i: usize| {
        let t = i as f64 / STEPS as f64 * std::f64::consts::TAU;
        (cx + rx * t.cos(), cy + ry * t.sin())
    };
    (0..STEPS).map(|i| (at(i), at(i + 1))).collect()
}

fn bounds_of(points: impl Iterator<Item = Point>) -> (f64, f64, f64, f64) {
    points.fold(
        (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        |(x0, y0, x1, y1), (x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    )
}

/// Even-odd ray casting.
fn point_in_polygon((x, y): Point, points: &[Point]) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn distance_to_segment((px, py): Point, (ax, ay): Point, (bx, by): Point) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

impl Template {
    /// Topmost region under the point.
    pub fn region_at(&self, point: Point) -> Option<usize> {
        self.regions
            .iter()
            .enumerate()
            .rev()
            .find(|(_, region)| region.shape.contains(point))
            .map(|(i, _)| i)
    }
}

// ============================================================================
// Pages
// ============================================================================

const FISH: &[Region] = &[
    Region {
        name: "body",
        shape: Shape::Polygon(&[
            (80.0, 50.0),
            (68.0, 37.0),
            (52.0, 29.0),
            (35.0, 28.0),
            (20.0, 36.0),
            (10.0, 50.0),
            (20.0, 64.0),
            (35.0, 72.0),
            (52.0, 71.0),
            (68.0, 63.0),
        ]),
        base: BaseFill::Paper,
    },
    Region {
        name: "tail",
        shape: Shape::Polygon(&[(80.0, 50.0), (95.0, 35.0), (95.0, 65.0)]),
        base: BaseFill::Paper,
    },
    Region {
        name: "eye",
        shape: Shape::Circle { cx: 30.0, cy: 40.0, r: 3.0 },
        base: BaseFill::Ink,
    },
    Region {
        name: "gill",
        shape: Shape::Strokes(&[((50.0, 50.0), (57.0, 52.0)), ((57.0, 52.0), (60.0, 60.0))]),
        base: BaseFill::Paper,
    },
];

const LION: &[Region] = &[
    Region {
        name: "mane",
        shape: Shape::Polygon(&[
            (50.0, 15.0),
            (55.0, 5.0),
            (65.0, 15.0),
            (75.0, 5.0),
            (80.0, 20.0),
            (95.0, 25.0),
            (85.0, 40.0),
            (95.0, 50.0),
            (85.0, 60.0),
            (95.0, 75.0),
            (80.0, 80.0),
            (75.0, 95.0),
            (65.0, 85.0),
            (55.0, 95.0),
            (50.0, 85.0),
            (45.0, 95.0),
            (35.0, 85.0),
            (25.0, 95.0),
            (20.0, 80.0),
            (5.0, 75.0),
            (15.0, 60.0),
            (5.0, 50.0),
            (15.0, 40.0),
            (5.0, 25.0),
            (20.0, 20.0),
            (25.0, 5.0),
            (35.0, 15.0),
            (45.0, 5.0),
        ]),
        base: BaseFill::Paper,
    },
    Region {
        name: "face",
        shape: Shape::Circle { cx: 50.0, cy: 50.0, r: 25.0 },
        base: BaseFill::Paper,
    },
    Region {
        name: "left eye",
        shape: Shape::Circle { cx: 42.0, cy: 45.0, r: 3.0 },
        base: BaseFill::Ink,
    },
    Region {
        name: "right eye",
        shape: Shape::Circle { cx: 58.0, cy: 45.0, r: 3.0 },
        base: BaseFill::Ink,
    },
    Region {
        name: "nose",
        shape: Shape::Polygon(&[(47.0, 55.0), (53.0, 55.0), (50.0, 60.0)]),
        base: BaseFill::Ink,
    },
    Region {
        name: "mouth",
        shape: Shape::Strokes(&[
            ((50.0, 60.0), (50.0, 65.0)),
            ((45.0, 65.0), (50.0, 68.0)),
            ((50.0, 68.0), (55.0, 65.0)),
        ]),
        base: BaseFill::Paper,
    },
];

const BIRD: &[Region] = &[
    Region {
        name: "body",
        shape: Shape::Circle { cx: 50.0, cy: 60.0, r: 30.0 },
        base: BaseFill::Paper,
    },
    Region {
        name: "tail",
        shape: Shape::Polygon(&[(20.0, 60.0), (5.0, 50.0), (5.0, 70.0)]),
        base: BaseFill::Paper,
    },
    Region {
        name: "wing",
        shape: Shape::Polygon(&[
            (40.0, 60.0),
            (50.0, 54.0),
            (70.0, 60.0),
            (56.0, 69.0),
            (46.0, 67.0),
        ]),
        base: BaseFill::Paper,
    },
    Region {
        name: "beak",
        shape: Shape::Polygon(&[(78.0, 45.0), (90.0, 50.0), (78.0, 55.0)]),
        base: BaseFill::Paper,
    },
    Region {
        name: "eye",
        shape: Shape::Circle { cx: 65.0, cy: 45.0, r: 3.0 },
        base: BaseFill::Ink,
    },
];

const CAT: &[Region] = &[
    Region {
        name: "left ear",
        shape: Shape::Polygon(&[(30.0, 35.0), (20.0, 15.0), (40.0, 25.0)]),
        base: BaseFill::Paper,
    },
    Region {
        name: "right ear",
        shape: Shape::Polygon(&[(70.0, 35.0), (80.0, 15.0), (60.0, 25.0)]),
        base: BaseFill::Paper,
    },
    Region {
        name: "head",
        shape: Shape::Circle { cx: 50.0, cy: 50.0, r: 30.0 },
        base: BaseFill::Paper,
    },
    Region {
        name: "left eye",
        shape: Shape::Ellipse { cx: 40.0, cy: 45.0, rx: 3.0, ry: 5.0 },
        base: BaseFill::Ink,
    },
    Region {
        name: "right eye",
        shape: Shape::Ellipse { cx: 60.0, cy: 45.0, rx: 3.0, ry: 5.0 },
        base: BaseFill::Ink,
    },
    Region {
        name: "nose",
        shape: Shape::Polygon(&[(48.0, 55.0), (52.0, 55.0), (50.0, 58.0)]),
        base: BaseFill::Ink,
    },
    Region {
        name: "left whiskers",
        shape: Shape::Strokes(&[
            ((30.0, 55.0), (15.0, 50.0)),
            ((30.0, 60.0), (15.0, 60.0)),
            ((30.0, 65.0), (15.0, 70.0)),
        ]),
        base: BaseFill::Paper,
    },
    Region {
        name: "right whiskers",
        shape: Shape::Strokes(&[
            ((70.0, 55.0), (85.0, 50.0)),
            ((70.0, 60.0), (85.0, 60.0)),
            ((70.0, 65.0), (85.0, 70.0)),
        ]),
        base: BaseFill::Paper,
    },
];

pub fn template(id: TemplateId) -> Template {
    let regions = match id {
        TemplateId::Fish => FISH,
        TemplateId::Lion => LION,
        TemplateId::Bird => BIRD,
        TemplateId::Cat => CAT,
    };
    Template { id, regions }
}
