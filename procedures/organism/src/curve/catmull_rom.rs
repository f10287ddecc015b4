use crate::curve::Polyline;
use crate::error::GeometryError;
use bevy::prelude::*;

/// Number of parametric steps used to tabulate arc length.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Knot intervals below this are treated as coincident points.
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Centripetal Catmull-Rom spline (alpha = 0.5).
///
/// Open curves extrapolate a phantom point past each end, so the curve passes through the first
/// and last control points. Closed curves wrap around.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomCurve {
	points: Vec<Vec3>,
	closed: bool,
	arc_lengths: Vec<f32>,
}

impl CatmullRomCurve {
	pub fn new(points: Vec<Vec3>, closed: bool) -> Result<Self, GeometryError> {
		if points.len() < 2 {
			return Err(GeometryError::InsufficientControlPoints { count: points.len() });
		}

		let mut curve = Self { points, closed, arc_lengths: Vec::new() };
		curve.arc_lengths = curve.tabulate_arc_lengths();
		Ok(curve)
	}

	pub fn open(points: Vec<Vec3>) -> Result<Self, GeometryError> {
		Self::new(points, false)
	}

	pub fn closed(points: Vec<Vec3>) -> Result<Self, GeometryError> {
		Self::new(points, true)
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn length(&self) -> f32 {
		self.arc_lengths.last().copied().unwrap_or_default()
	}

	/// Point at curve parameter `t` in `[0, 1]`.
	pub fn point_at(&self, t: f32) -> Vec3 {
		let count = self.points.len();
		let segments = if self.closed { count } else { count - 1 };

		let p = segments as f32 * t.clamp(0.0, 1.0);
		let mut index = p.floor() as usize;
		let mut weight = p - index as f32;

		if !self.closed && index >= count - 1 {
			index = count - 2;
			weight = 1.0;
		}

		let p1 = self.points[index % count];
		let p2 = self.points[(index + 1) % count];

		let p0 = if self.closed || index > 0 {
			self.points[(index + count - 1) % count]
		} else {
			self.points[0] * 2.0 - self.points[1]
		};

		let p3 = if self.closed || index + 2 < count {
			self.points[(index + 2) % count]
		} else {
			self.points[count - 1] * 2.0 - self.points[count - 2]
		};

		centripetal(p0, p1, p2, p3, weight)
	}

	/// Point at fraction `u` of the total arc length.
	pub fn point_at_arc(&self, u: f32) -> Vec3 {
		self.point_at(self.arc_to_parameter(u))
	}

	/// Maps an arc length fraction to the curve parameter using the tabulated lengths.
	fn arc_to_parameter(&self, u: f32) -> f32 {
		let last = self.arc_lengths.len() - 1;
		let target = u.clamp(0.0, 1.0) * self.length();

		let index = self.arc_lengths.partition_point(|length| *length <= target).saturating_sub(1);
		let index = index.min(last - 1);

		let before = self.arc_lengths[index];
		let segment = self.arc_lengths[index + 1] - before;
		if segment <= 0.0 {
			return index as f32 / last as f32;
		}

		let fraction = ((target - before) / segment).clamp(0.0, 1.0);
		(index as f32 + fraction) / last as f32
	}

	/// `divisions + 1` points, evenly spaced by arc length.
	pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
		let divisions = divisions.max(1);
		(0..=divisions).map(|d| self.point_at_arc(d as f32 / divisions as f32)).collect()
	}

	/// `divisions + 1` points, evenly spaced by curve parameter.
	pub fn points(&self, divisions: usize) -> Vec<Vec3> {
		let divisions = divisions.max(1);
		(0..=divisions).map(|d| self.point_at(d as f32 / divisions as f32)).collect()
	}

	/// Samples `count` arc length spaced points (at least two) into a polyline.
	pub fn sample(&self, count: usize) -> Polyline {
		Polyline::new(self.spaced_points(count.max(2) - 1))
	}

	fn tabulate_arc_lengths(&self) -> Vec<f32> {
		let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
		let mut last = self.point_at(0.0);
		let mut sum = 0.0;
		lengths.push(sum);

		for division in 1..=ARC_LENGTH_DIVISIONS {
			let current = self.point_at(division as f32 / ARC_LENGTH_DIVISIONS as f32);
			sum += current.distance(last);
			lengths.push(sum);
			last = current;
		}

		lengths
	}
}

fn centripetal(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, weight: f32) -> Vec3 {
	let mut dt0 = p0.distance_squared(p1).powf(0.25);
	let mut dt1 = p1.distance_squared(p2).powf(0.25);
	let mut dt2 = p2.distance_squared(p3).powf(0.25);

	if dt1 < MIN_KNOT_INTERVAL {
		dt1 = 1.0;
	}
	if dt0 < MIN_KNOT_INTERVAL {
		dt0 = dt1;
	}
	if dt2 < MIN_KNOT_INTERVAL {
		dt2 = dt1;
	}

	// tangents for the non uniform parameterization, rescaled to [0, 1]
	let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
	let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

	hermite(p1, p2, m1, m2, weight)
}

fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3, w: f32) -> Vec3 {
	let c2 = -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1;
	let c3 = 2.0 * x0 - 2.0 * x1 + t0 + t1;
	x0 + t0 * w + c2 * (w * w) + c3 * (w * w * w)
}
