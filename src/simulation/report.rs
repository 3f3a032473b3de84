// src/simulation/report.rs

use std::io::Write;

use crate::models::{average_power_kw, MotorMode};
use crate::simulation::error::SimulationError;
use crate::simulation::framework::{RunSummary, Termination};
use crate::simulation::{SimulationState, StepResult};

/// 報告間隔 (シミュレーション時間)
///
/// 表示専用であり、物理計算には一切影響しない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportCadence {
    interval: f64,
}

impl ReportCadence {
    /// `interval` 秒ごとに報告する。0 以下なら毎刻み報告する
    pub fn every(interval: f64) -> Self {
        Self { interval }
    }

    #[cfg(test)]
    pub fn every_step() -> Self {
        Self { interval: 0.0 }
    }

    /// 直前の時刻から新しい時刻までの間に報告間隔の倍数をまたいだか
    pub fn should_report(&self, previous_time: f64, time: f64) -> bool {
        if self.interval <= 0.0 {
            return true;
        }
        (time / self.interval).floor() > (previous_time / self.interval).floor()
    }
}

impl Default for ReportCadence {
    fn default() -> Self {
        Self::every(1.0)
    }
}

/// 報告先に渡される一刻みぶんのスナップショット
#[derive(Debug, Clone, Copy)]
pub struct StepReport<'a> {
    pub state: &'a SimulationState,
    pub result: &'a StepResult,
}

impl StepReport<'_> {
    pub fn average_power_consumed_kw(&self) -> f64 {
        average_power_kw(self.state.energy.consumed, self.state.time)
    }

    pub fn average_power_generated_kw(&self) -> f64 {
        average_power_kw(self.state.energy.generated, self.state.time)
    }
}

/// 外部の報告先
pub trait ReportSink {
    fn report(&mut self, report: &StepReport<'_>) -> Result<(), SimulationError>;

    fn finish(&mut self, _summary: &RunSummary) -> Result<(), SimulationError> {
        Ok(())
    }
}

impl ReportSink for Vec<Box<dyn ReportSink>> {
    fn report(&mut self, report: &StepReport<'_>) -> Result<(), SimulationError> {
        for sink in self.iter_mut() {
            sink.report(report)?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SimulationError> {
        for sink in self.iter_mut() {
            sink.finish(summary)?;
        }
        Ok(())
    }
}

/// 人が読むためのテキスト出力
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReporter<W> {
    fn report(&mut self, report: &StepReport<'_>) -> Result<(), SimulationError> {
        let state = report.state;
        let result = report.result;
        let brake = if result.brake.engaged {
            "Engaged"
        } else {
            "Disengaged"
        };
        let mode = match result.load.mode {
            MotorMode::Traction => "Traction",
            MotorMode::Regenerative => "Regenerative",
        };

        writeln!(self.out, "Time: {:.1}s", state.time)?;
        writeln!(self.out, "Cabin position: {:.2} m", state.position)?;
        writeln!(self.out, "Cabin speed: {:.2} m/s", state.velocity)?;
        writeln!(self.out, "Cabin acceleration: {:.2} m/s²", state.acceleration)?;
        writeln!(
            self.out,
            "Counterweight position: {:.2} m",
            state.counterweight_position
        )?;
        writeln!(self.out, "Motor torque: {:.2} Nm", result.load.motor_torque)?;
        writeln!(self.out, "Motor speed: {:.2} rad/s", result.load.motor_speed)?;
        writeln!(self.out, "Brake status: {}", brake)?;
        writeln!(self.out, "Motor mode: {}", mode)?;
        writeln!(
            self.out,
            "Total energy consumed: {:.2} J",
            state.energy.consumed
        )?;
        writeln!(
            self.out,
            "Average power consumed: {:.2} kW",
            report.average_power_consumed_kw()
        )?;
        writeln!(
            self.out,
            "Total energy generated: {:.2} J",
            state.energy.generated
        )?;
        writeln!(
            self.out,
            "Average power generated: {:.2} kW",
            report.average_power_generated_kw()
        )?;
        writeln!(self.out, "----------------------------")?;
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SimulationError> {
        match summary.termination {
            Termination::TargetReached => writeln!(
                self.out,
                "Target height reached at {:.1}s (position {:.3} m).",
                summary.final_state.time, summary.final_state.position
            )?,
            Termination::TimeExpired => writeln!(
                self.out,
                "Simulation time expired at {:.1}s before reaching the target (position {:.3} m).",
                summary.final_state.time, summary.final_state.position
            )?,
        }
        if let Some(instability) = &summary.instability {
            writeln!(self.out, "Warning: {}", instability)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// 報告されたスナップショットをすべて保持する
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub records: Vec<(SimulationState, StepResult)>,
    pub summary: Option<RunSummary>,
}

#[cfg(test)]
impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> impl Iterator<Item = &SimulationState> {
        self.records.iter().map(|(state, _)| state)
    }
}

#[cfg(test)]
impl ReportSink for Recorder {
    fn report(&mut self, report: &StepReport<'_>) -> Result<(), SimulationError> {
        self.records.push((*report.state, *report.result));
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SimulationError> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}
