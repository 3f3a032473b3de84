// src/math/mod.rs

pub mod integrator;
pub mod saturation;

pub use integrator::counterweight_position;
pub use integrator::semi_implicit_euler;
pub use integrator::Kinematics;
pub use saturation::saturate;
