// src/models/mod.rs

pub mod brake;
pub mod energy;
pub mod physics;
pub mod pid;

pub use brake::{apply_brake, BrakeOutcome};
pub use energy::{accumulate_energy, average_power_kw, EnergyTotals};
pub use physics::{solve_motor_load, MotorLoad, MotorMode};
pub use pid::{pid_update, PidGains, PidState};
