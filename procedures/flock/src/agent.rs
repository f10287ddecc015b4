use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Below this speed an agent keeps its heading.
const MIN_TURNING_SPEED: f32 = 0.01;

/// How strongly the body sways while swimming, before the agent's amplitude is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WobbleGains {
	pub yaw: f32,
	pub roll: f32,
}

impl WobbleGains {
	pub fn fish() -> Self {
		Self { yaw: 0.15, roll: 0.05 }
	}

	pub fn shark() -> Self {
		Self { yaw: 0.1, roll: 0.03 }
	}
}

/// One swimmer of the flock.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
	pub position: Vec3,
	pub velocity: Vec3,
	/// Steering accumulated during the current tick.
	pub acceleration: Vec3,
	/// Rotation about +Y. The body faces -X at zero yaw.
	pub yaw: f32,
	pub swim_speed: f32,
	pub swim_amplitude: f32,
	pub turn_smoothness: f32,
	pub phase: f32,
	pub scale: f32,
	pub wobble: WobbleGains,
	pub is_predator: bool,
}

impl Agent {
	pub fn prey(position: Vec3, velocity: Vec3) -> Self {
		Self {
			position,
			velocity,
			acceleration: Vec3::ZERO,
			yaw: 0.0,
			swim_speed: 0.8,
			swim_amplitude: 0.2,
			turn_smoothness: 0.05,
			phase: 0.0,
			scale: 1.0,
			wobble: WobbleGains::fish(),
			is_predator: false,
		}
	}

	pub fn predator(position: Vec3, velocity: Vec3) -> Self {
		Self {
			swim_speed: 1.1,
			swim_amplitude: 0.18,
			turn_smoothness: 0.04,
			wobble: WobbleGains::shark(),
			is_predator: true,
			..Self::prey(position, velocity)
		}
	}

	pub fn with_swim_speed(mut self, swim_speed: f32) -> Self {
		self.swim_speed = swim_speed;
		self
	}

	pub fn with_swim_amplitude(mut self, swim_amplitude: f32) -> Self {
		self.swim_amplitude = swim_amplitude;
		self
	}

	pub fn with_turn_smoothness(mut self, turn_smoothness: f32) -> Self {
		self.turn_smoothness = turn_smoothness;
		self
	}

	pub fn with_phase(mut self, phase: f32) -> Self {
		self.phase = phase;
		self
	}

	pub fn with_scale(mut self, scale: f32) -> Self {
		self.scale = scale;
		self
	}

	/// Yaw that points the body along the current velocity.
	pub fn target_yaw(&self) -> f32 {
		self.velocity.z.atan2(-self.velocity.x)
	}

	/// Turns a fraction of the shortest way toward the velocity heading.
	pub fn ease_yaw(&mut self) {
		if self.velocity.length() <= MIN_TURNING_SPEED {
			return;
		}
		let diff = wrap_angle(self.target_yaw() - self.yaw);
		self.yaw = wrap_angle(self.yaw + diff * self.turn_smoothness);
	}

	pub fn heading_rotation(&self) -> Quat {
		Quat::from_rotation_y(self.yaw)
	}

	/// Mesh local sway at `elapsed` seconds. Purely visual, it never feeds back into steering.
	pub fn swim_wobble(&self, elapsed: f32) -> Quat {
		let yaw = (elapsed * 6.0 + self.phase).sin() * self.wobble.yaw * self.swim_amplitude;
		let roll = (elapsed * 3.0 + self.phase).sin() * self.wobble.roll * self.swim_amplitude;
		Quat::from_euler(EulerRot::XYZ, 0.0, yaw, roll)
	}
}

/// Wraps an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
	(angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_target_yaw_faces_velocity() {
		let agent = Agent::prey(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0));
		let facing = Quat::from_rotation_y(agent.target_yaw()) * Vec3::NEG_X;
		assert!(facing.abs_diff_eq(Vec3::Z, 1e-6));
	}

	#[test]
	fn test_ease_yaw_takes_a_fraction() {
		let mut agent = Agent::prey(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
		agent.ease_yaw();
		assert!((agent.yaw - PI / 2.0 * 0.05).abs() < 1e-6);
	}

	#[test]
	fn test_ease_yaw_takes_shortest_way() {
		let mut agent = Agent::prey(Vec3::ZERO, Vec3::new(1.0, 0.0, -0.01));
		agent.yaw = PI * 0.9;
		agent.ease_yaw();
		// target is just past -PI, so the turn continues through PI instead of unwinding
		assert!(agent.yaw > PI * 0.9 || agent.yaw < -PI * 0.9);
	}

	#[test]
	fn test_still_agent_keeps_heading() {
		let mut agent = Agent::prey(Vec3::ZERO, Vec3::ZERO);
		agent.yaw = 1.0;
		agent.ease_yaw();
		assert_eq!(agent.yaw, 1.0);
	}

	#[test]
	fn test_swim_wobble_is_bounded() {
		let agent = Agent::predator(Vec3::ZERO, Vec3::X).with_phase(0.7);
		for step in 0..100 {
			let (yaw, roll) = {
				let (_, yaw, roll) = agent.swim_wobble(step as f32 * 0.05).to_euler(EulerRot::XYZ);
				(yaw, roll)
			};
			assert!(yaw.abs() <= 0.1 * 0.18 + 1e-5);
			assert!(roll.abs() <= 0.03 * 0.18 + 1e-5);
		}
	}

	#[test]
	fn test_wrap_angle() {
		assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
		assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
		assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
	}
}
