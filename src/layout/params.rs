//! Tunable force parameters.

/// Velocity is scaled by this factor after every integration step.
pub const VELOCITY_DAMPING: f64 = 0.95;

/// Strength of the pull toward the surface center, per squared unit of distance.
pub const CENTERING_COEFFICIENT: f64 = 1e-3;

/// How pairwise repulsion is combined into a node's acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepulsionMode {
	/// Every other node contributes; the contributions are summed.
	#[default]
	Summed,
	/// Each pair overwrites the previous one, so only the last node in
	/// iteration order repels the subject. Reproduces legacy layouts exactly.
	LastPairOnly,
}

/// Force constants for the layout simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceParams {
	/// Multiplier of the logarithmic spring pull.
	pub spring_constant: f64,
	/// Edge length below which springs exert nothing.
	pub spring_length: f64,
	/// Numerator of the inverse-square repulsion.
	pub repulsive_constant: f64,
	/// Cap on the magnitude of a single repulsive force.
	pub max_repulsive_force: f64,
	/// Repulsion accumulation policy.
	pub repulsion: RepulsionMode,
}

impl Default for ForceParams {
	fn default() -> Self {
		Self {
			spring_constant: 1e2,
			spring_length: 30.0,
			repulsive_constant: 1e5,
			max_repulsive_force: 1e4,
			repulsion: RepulsionMode::default(),
		}
	}
}

impl ForceParams {
	/// Set the spring constant.
	pub fn with_spring_constant(mut self, value: f64) -> Self {
		self.spring_constant = value;
		self
	}

	/// Set the spring rest length.
	pub fn with_spring_length(mut self, value: f64) -> Self {
		self.spring_length = value;
		self
	}

	/// Set the repulsive constant.
	pub fn with_repulsive_constant(mut self, value: f64) -> Self {
		self.repulsive_constant = value;
		self
	}

	/// Set the repulsive force cap.
	pub fn with_max_repulsive_force(mut self, value: f64) -> Self {
		self.max_repulsive_force = value;
		self
	}

	/// Set the repulsion accumulation policy.
	pub fn with_repulsion(mut self, mode: RepulsionMode) -> Self {
		self.repulsion = mode;
		self
	}
}
