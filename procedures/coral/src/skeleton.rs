use bevy::prelude::*;

/// One cylinder segment of a coral branch, in the coral's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInstance {
	pub translation: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
}

impl SegmentInstance {
	pub fn transform(&self) -> Transform {
		Transform { translation: self.translation, rotation: self.rotation, scale: self.scale }
	}

	pub fn length(&self) -> f32 {
		self.scale.y
	}

	/// Where the segment's unit length axis ends.
	pub fn end(&self) -> Vec3 {
		self.translation + self.rotation * Vec3::Y * self.scale.y
	}
}

/// The segments drawn by one walk of an expanded grammar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoralSkeleton {
	segments: Vec<SegmentInstance>,
	symbols: usize,
	iterations: usize,
}

impl CoralSkeleton {
	pub fn new(segments: Vec<SegmentInstance>, symbols: usize, iterations: usize) -> Self {
		Self { segments, symbols, iterations }
	}

	pub fn segments(&self) -> &[SegmentInstance] {
		&self.segments
	}

	pub fn segment_count(&self) -> usize {
		self.segments.len()
	}

	/// Length of the expanded string that was walked.
	pub fn symbols(&self) -> usize {
		self.symbols
	}

	pub fn iterations(&self) -> usize {
		self.iterations
	}
}
