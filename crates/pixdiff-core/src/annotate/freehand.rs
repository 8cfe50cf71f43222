//! Freehand stroke outline geometry.
//!
//! Turns raw pointer samples `(x, y, pressure)` into a closed polygon that
//! outlines a variable-width ink stroke: the input is streamlined with a
//! low-pass interpolation, a per-point radius is derived from (simulated or
//! measured) pressure via the thinning factor, left/right edge points are
//! offset along the path normals with smoothing-based culling, and round
//! caps close both ends.

use std::f32::consts::PI;

use crate::annotate::model::StrokePoint;
use crate::consts::{DEFAULT_PRESSURE, STROKE_SMOOTHING, STROKE_STREAMLINE, STROKE_THINNING};

/// Slightly over PI so cap sweeps don't terminate one segment short.
const FIXED_PI: f32 = PI + 0.0001;

/// Number of segments in each round cap arc.
const CAP_SEGMENTS: usize = 13;

/// Trailing distance (in input units) near the stroke end where intermediate
/// points are dropped in favor of the final point.
const TAIL_CUTOFF: f32 = 3.0;

/// Fallback pressure for the very first sample when none is recorded,
/// lighter than [`DEFAULT_PRESSURE`] so strokes taper in.
const FIRST_POINT_PRESSURE: f32 = 0.25;

#[derive(Clone, Copy, Debug)]
pub struct StrokeOptions {
    /// Full stroke diameter at neutral pressure.
    pub size: f32,
    /// 0 = constant width; 1 = full pressure-to-radius response.
    pub thinning: f32,
    /// Outline point culling distance factor.
    pub smoothing: f32,
    /// Input low-pass strength (0 = raw input, 1 = maximum smoothing).
    pub streamline: f32,
    /// Derive pressure from inter-point velocity instead of the recorded values.
    pub simulate_pressure: bool,
    /// The stroke is complete; the final input point is used exactly.
    pub last: bool,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: STROKE_THINNING,
            smoothing: STROKE_SMOOTHING,
            streamline: STROKE_STREAMLINE,
            simulate_pressure: true,
            last: false,
        }
    }
}

/// An input sample after streamlining, with path-following metadata.
#[derive(Clone, Copy, Debug)]
pub struct PathPoint {
    pub point: [f32; 2],
    pub pressure: f32,
    /// Unit vector pointing back toward the previous point.
    pub vector: [f32; 2],
    pub distance: f32,
    pub running_length: f32,
}

/// Compute the closed outline polygon for a stroke.
pub fn get_stroke(input: &[StrokePoint], options: &StrokeOptions) -> Vec<[f32; 2]> {
    get_stroke_outline_points(&get_stroke_points(input, options), options)
}

/// Streamline the raw input samples and annotate them with distances and
/// direction vectors.
pub fn get_stroke_points(input: &[StrokePoint], options: &StrokeOptions) -> Vec<PathPoint> {
    if input.is_empty() {
        return Vec::new();
    }

    let t = 0.15 + (1.0 - options.streamline) * 0.85;

    let mut pts: Vec<[f32; 3]> = input.iter().map(|p| [p.x, p.y, p.pressure]).collect();
    if pts.len() == 1 {
        let p = pts[0];
        pts.push([p[0] + 1.0, p[1] + 1.0, p[2]]);
    }

    let mut points = Vec::with_capacity(pts.len());
    points.push(PathPoint {
        point: [pts[0][0], pts[0][1]],
        pressure: if pts[0][2] >= 0.0 {
            pts[0][2]
        } else {
            FIRST_POINT_PRESSURE
        },
        vector: [1.0, 1.0],
        distance: 0.0,
        running_length: 0.0,
    });

    let mut reached_minimum_length = false;
    let mut running_length = 0.0;
    let max = pts.len() - 1;

    for (i, raw) in pts.iter().enumerate().skip(1) {
        let prev = *points.last().expect("seeded with the first point");
        let point = if options.last && i == max {
            [raw[0], raw[1]]
        } else {
            lrp(prev.point, [raw[0], raw[1]], t)
        };

        if prev.point == point {
            continue;
        }

        let distance = dist(point, prev.point);
        running_length += distance;

        // Suppress jitter near the start until the stroke has traveled at
        // least its own width.
        if i < max && !reached_minimum_length {
            if running_length < options.size {
                continue;
            }
            reached_minimum_length = true;
        }

        points.push(PathPoint {
            point,
            pressure: if raw[2] >= 0.0 { raw[2] } else { DEFAULT_PRESSURE },
            vector: uni(sub(prev.point, point)),
            distance,
            running_length,
        });
    }

    if points.len() > 1 {
        points[0].vector = points[1].vector;
    }

    points
}

/// Offset the path points into a closed outline polygon with round caps.
pub fn get_stroke_outline_points(points: &[PathPoint], options: &StrokeOptions) -> Vec<[f32; 2]> {
    let size = options.size;
    if points.is_empty() || size <= 0.0 {
        return Vec::new();
    }

    let n = points.len();
    let total_length = points[n - 1].running_length;
    let min_distance_sq = (size * options.smoothing).powi(2);

    let mut left_pts: Vec<[f32; 2]> = Vec::new();
    let mut right_pts: Vec<[f32; 2]> = Vec::new();

    // Seed the pressure average from the first few samples so the stroke
    // start does not spike to full width.
    let mut prev_pressure = points.iter().take(10).fold(points[0].pressure, |acc, curr| {
        let mut pressure = curr.pressure;
        if options.simulate_pressure {
            let sp = (curr.distance / size).min(1.0);
            let rp = (1.0 - sp).min(1.0);
            pressure = (acc + (rp - acc) * (sp / 2.0)).min(1.0);
        }
        (acc + pressure) / 2.0
    });

    let mut radius = stroke_radius(size, options.thinning, points[n - 1].pressure);
    let mut first_radius: Option<f32> = None;
    let mut prev_vector = points[0].vector;
    let mut pl = points[0].point;
    let mut pr = pl;
    let mut prev_was_sharp_corner = false;

    for i in 0..n {
        let PathPoint {
            point,
            vector,
            distance,
            running_length,
            mut pressure,
        } = points[i];

        // Drop intermediate points in the trailing few pixels; the final
        // point represents the stroke end.
        if i < n - 1 && total_length - running_length < TAIL_CUTOFF {
            continue;
        }

        if options.thinning != 0.0 {
            if options.simulate_pressure {
                let sp = (distance / size).min(1.0);
                let rp = (1.0 - sp).min(1.0);
                pressure = (prev_pressure + (rp - prev_pressure) * (sp / 2.0)).min(1.0);
            }
            radius = stroke_radius(size, options.thinning, pressure);
        } else {
            radius = size / 2.0;
        }
        radius = radius.max(0.01);
        if first_radius.is_none() {
            first_radius = Some(radius);
        }

        let next_vector = if i < n - 1 { points[i + 1].vector } else { vector };
        let next_dpr = if i < n - 1 { dpr(vector, next_vector) } else { 1.0 };
        let prev_dpr = dpr(vector, prev_vector);

        // A reversal in direction gets a fan of points around the corner so
        // the outline does not fold over itself.
        let is_sharp_corner = prev_dpr < 0.0 && !prev_was_sharp_corner;
        let next_is_sharp_corner = next_dpr < 0.0;

        if is_sharp_corner || next_is_sharp_corner {
            let offset = mul(per(prev_vector), radius);
            for k in 0..=CAP_SEGMENTS {
                let t = k as f32 / CAP_SEGMENTS as f32;
                let tl = rot_around(sub(point, offset), point, FIXED_PI * t);
                left_pts.push(tl);
                let tr = rot_around(add(point, offset), point, -FIXED_PI * t);
                right_pts.push(tr);
                pl = tl;
                pr = tr;
            }
            if next_is_sharp_corner {
                prev_was_sharp_corner = true;
            }
            continue;
        }
        prev_was_sharp_corner = false;

        if i == n - 1 {
            let offset = mul(per(vector), radius);
            left_pts.push(sub(point, offset));
            right_pts.push(add(point, offset));
            continue;
        }

        let offset = mul(per(lrp(vector, next_vector, next_dpr)), radius);

        let tl = sub(point, offset);
        if i <= 1 || dist_sq(pl, tl) > min_distance_sq {
            left_pts.push(tl);
            pl = tl;
        }
        let tr = add(point, offset);
        if i <= 1 || dist_sq(pr, tr) > min_distance_sq {
            right_pts.push(tr);
            pr = tr;
        }

        prev_pressure = pressure;
        prev_vector = vector;
    }

    let first_point = points[0].point;
    let last_point = if n > 1 {
        points[n - 1].point
    } else {
        add(points[0].point, [1.0, 1.0])
    };

    // A stationary tap renders as a filled dot.
    if n == 1 {
        let r = first_radius.unwrap_or(radius);
        let mut dot = Vec::with_capacity(CAP_SEGMENTS);
        for k in 1..=CAP_SEGMENTS {
            let t = k as f32 / CAP_SEGMENTS as f32;
            dot.push(rot_around(add(first_point, [r, 0.0]), first_point, FIXED_PI * 2.0 * t));
        }
        return dot;
    }

    // Round end cap: arc from the left edge around the last point to the
    // right edge.
    let mut end_cap = Vec::with_capacity(CAP_SEGMENTS);
    if let Some(&left_end) = left_pts.last() {
        for k in 1..CAP_SEGMENTS {
            let t = k as f32 / CAP_SEGMENTS as f32;
            end_cap.push(rot_around(left_end, last_point, FIXED_PI * t));
        }
    }

    // Round start cap: arc from the right edge around the first point back
    // to the left edge, closing the loop.
    let mut start_cap = Vec::with_capacity(CAP_SEGMENTS);
    if let Some(&right_start) = right_pts.first() {
        for k in 1..CAP_SEGMENTS {
            let t = k as f32 / CAP_SEGMENTS as f32;
            start_cap.push(rot_around(right_start, first_point, FIXED_PI * t));
        }
    }

    let mut outline = left_pts;
    outline.extend(end_cap);
    outline.extend(right_pts.into_iter().rev());
    outline.extend(start_cap);
    outline
}

/// Stroke radius for a given pressure: `size * (0.5 - thinning * (0.5 - p))`.
fn stroke_radius(size: f32, thinning: f32, pressure: f32) -> f32 {
    size * (0.5 - thinning * (0.5 - pressure))
}

fn add(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] + b[0], a[1] + b[1]]
}

fn sub(a: [f32; 2], b: [f32; 2]) -> [f32; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn mul(a: [f32; 2], s: f32) -> [f32; 2] {
    [a[0] * s, a[1] * s]
}

/// Perpendicular (rotated clockwise).
fn per(a: [f32; 2]) -> [f32; 2] {
    [a[1], -a[0]]
}

fn dpr(a: [f32; 2], b: [f32; 2]) -> f32 {
    a[0] * b[0] + a[1] * b[1]
}

fn dist_sq(a: [f32; 2], b: [f32; 2]) -> f32 {
    let d = sub(a, b);
    dpr(d, d)
}

fn dist(a: [f32; 2], b: [f32; 2]) -> f32 {
    dist_sq(a, b).sqrt()
}

fn uni(a: [f32; 2]) -> [f32; 2] {
    let len = dpr(a, a).sqrt();
    if len == 0.0 {
        [0.0, 0.0]
    } else {
        mul(a, 1.0 / len)
    }
}

fn lrp(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    add(a, mul(sub(b, a), t))
}

fn rot_around(point: [f32; 2], center: [f32; 2], angle: f32) -> [f32; 2] {
    let (s, c) = angle.sin_cos();
    let px = point[0] - center[0];
    let py = point[1] - center[1];
    [px * c - py * s + center[0], px * s + py * c + center[1]]
}
