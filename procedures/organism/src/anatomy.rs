use crate::curve::ProfileCurve;
use crate::fin::FinSide;

#[derive(Debug, Clone, PartialEq)]
pub struct FinProfile {
	pub name: String,
	pub outline: ProfileCurve,
	pub side: FinSide,
}

impl FinProfile {
	pub fn new(name: impl Into<String>, outline: ProfileCurve, side: FinSide) -> Self {
		Self { name: name.into(), outline, side }
	}
}

/// Profile curves describing a swimming body, snout at the origin and tail toward +x.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganismProfile {
	pub name: String,
	pub top: ProfileCurve,
	pub bottom: ProfileCurve,
	/// Half width of the body, in z.
	pub side: ProfileCurve,
	pub tail: ProfileCurve,
	pub fins: Vec<FinProfile>,
}

impl OrganismProfile {
	pub fn fish() -> Self {
		Self {
			name: "fish".to_string(),
			top: ProfileCurve::from_xy(&[[0.0, 0.0], [1.0, 2.0], [5.0, 5.0], [10.0, 0.0]]),
			bottom: ProfileCurve::from_xy(&[
				[0.0, 0.0],
				[0.1, -0.15],
				[0.5, -0.35],
				[4.5, -1.0],
				[8.0, -0.6],
				[9.5, -0.45],
				[10.0, -0.5],
			]),
			side: ProfileCurve::from_xyz(&[
				[0.0, 0.0, 0.0],
				[0.1, 0.0, 0.125],
				[1.0, 0.0, 0.375],
				[4.0, -0.25, 0.6],
				[8.0, 0.0, 0.25],
				[10.0, 0.0, 0.05],
			]),
			tail: ProfileCurve::from_xy(&[
				[11.0, -1.0],
				[12.5, -1.5],
				[12.0, 0.0],
				[12.5, 1.5],
				[11.0, 1.0],
				[10.0, 0.0],
			]),
			fins: vec![
				FinProfile::new(
					"dorsal",
					ProfileCurve::from_xy(&[
						[7.0, 2.0],
						[7.0, 5.0],
						[6.0, 5.3],
						[4.9, 4.9],
						[4.7, 4.7],
					]),
					FinSide::Dorsal,
				),
				FinProfile::new(
					"anal",
					ProfileCurve::from_xy(&[[6.0, -0.9], [7.25, -1.5], [7.5, -0.75]]),
					FinSide::Ventral,
				),
				FinProfile::new(
					"pelvic",
					ProfileCurve::from_xy(&[[2.25, -0.7], [3.75, -2.0], [4.0, -1.0]]),
					FinSide::Ventral,
				),
			],
		}
	}

	pub fn shark() -> Self {
		Self {
			name: "shark".to_string(),
			top: ProfileCurve::from_xy(&[
				[0.0, 0.0],
				[2.0, 3.0],
				[9.0, 6.0],
				[16.0, 3.0],
				[22.0, 0.0],
			]),
			bottom: ProfileCurve::from_xy(&[
				[0.0, 0.0],
				[2.0, -1.2],
				[9.0, -1.6],
				[14.0, -1.2],
				[20.0, -0.7],
				[22.0, 0.0],
			]),
			side: ProfileCurve::from_xyz(&[
				[0.0, 0.0, 0.0],
				[2.0, 0.0, 0.3],
				[7.0, -0.6, 1.6],
				[16.0, 0.0, 0.65],
				[22.0, 0.0, 0.1],
			]),
			tail: ProfileCurve::from_xy(&[
				[23.0, -2.2],
				[26.0, -4.0],
				[25.2, 0.0],
				[26.0, 4.0],
				[23.0, 2.2],
				[22.0, 0.0],
			]),
			fins: vec![
				FinProfile::new(
					"dorsal",
					ProfileCurve::from_xy(&[
						[11.0, 3.0],
						[12.0, 9.5],
						[11.2, 9.0],
						[10.2, 5.5],
						[10.8, 3.2],
					]),
					FinSide::Dorsal,
				),
				FinProfile::new(
					"pelvic",
					ProfileCurve::from_xy(&[[7.0, -1.4], [8.8, -3.8], [10.0, -2.2]]),
					FinSide::Ventral,
				),
			],
		}
	}

	/// Snout to the end of the body profile, tail excluded.
	pub fn body_length(&self) -> f32 {
		self.top.control_points().last().map(|p| p.x).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_presets_share_snout_and_body_end() {
		for profile in [OrganismProfile::fish(), OrganismProfile::shark()] {
			let length = profile.body_length();
			for curve in [&profile.top, &profile.bottom, &profile.side] {
				let points = curve.control_points();
				assert_eq!(points[0].x, 0.0);
				assert_eq!(points[points.len() - 1].x, length);
			}

			// the tail curve closes back onto the end of the body
			let tail = profile.tail.control_points();
			assert_eq!(tail[tail.len() - 1].x, length);
		}
	}

	#[test]
	fn test_fin_sides() {
		let fish = OrganismProfile::fish();
		assert_eq!(fish.fins.len(), 3);
		assert_eq!(fish.fins[0].side, FinSide::Dorsal);

		let shark = OrganismProfile::shark();
		assert_eq!(shark.fins.len(), 2);
		assert_eq!(shark.fins[1].side, FinSide::Ventral);
	}
}
