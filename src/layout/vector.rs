//! Two-dimensional vector value type used for positions, velocities and forces.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use rand::Rng;

/// A 2D vector. Every combinator returns a new value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component.
	pub y: f64,
}

impl Vector {
	/// The zero vector.
	pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

	/// Build a vector from its components.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Both components uniform in `[0, 1)`, drawn from the thread RNG.
	pub fn rand() -> Self {
		Self::rand_with(&mut rand::rng())
	}

	/// Both components uniform in `[0, 1)`, drawn from `rng`.
	pub fn rand_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::new(rng.random::<f64>(), rng.random::<f64>())
	}

	/// Elementwise product.
	pub fn mul_elem(self, other: Self) -> Self {
		Self::new(self.x * other.x, self.y * other.y)
	}

	/// Adds `s` to both components.
	pub fn add_scalar(self, s: f64) -> Self {
		Self::new(self.x + s, self.y + s)
	}

	/// Euclidean length.
	pub fn magnitude(self) -> f64 {
		self.x.hypot(self.y)
	}

	/// Unit vector in the same direction.
	///
	/// The zero vector has no direction: the result has `NaN` components.
	/// Callers that can hit zero must guard first.
	pub fn normalize(self) -> Self {
		self / self.magnitude()
	}

	/// True when neither component is `NaN` or infinite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Vector {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Vector {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Vector {
	type Output = Self;

	fn mul(self, s: f64) -> Self {
		Self::new(self.x * s, self.y * s)
	}
}

impl Div<f64> for Vector {
	type Output = Self;

	fn div(self, s: f64) -> Self {
		Self::new(self.x / s, self.y / s)
	}
}

impl Neg for Vector {
	type Output = Self;

	fn neg(self) -> Self {
		Self::new(-self.x, -self.y)
	}
}

impl AddAssign for Vector {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl SubAssign for Vector {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl From<(f64, f64)> for Vector {
	fn from((x, y): (f64, f64)) -> Self {
		Self::new(x, y)
	}
}
