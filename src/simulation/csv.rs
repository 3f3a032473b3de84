// src/simulation/csv.rs

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::simulation::error::SimulationError;
use crate::simulation::framework::RunSummary;
use crate::simulation::report::{ReportSink, StepReport};

/// CSVヘッダー
const HEADER: [&str; 13] = [
    "time(s)",
    "cabin_position(m)",
    "cabin_velocity(m/s)",
    "cabin_acceleration(m/s2)",
    "counterweight_position(m)",
    "motor_torque(Nm)",
    "motor_speed(rad/s)",
    "brake_engaged(bool)",
    "motor_mode",
    "energy_consumed(J)",
    "average_power_consumed(kW)",
    "energy_generated(J)",
    "average_power_generated(kW)",
];

/// CSVの一行
#[derive(Debug, Serialize)]
struct CsvRow {
    time: f64,
    position: f64,
    velocity: f64,
    acceleration: f64,
    counterweight_position: f64,
    motor_torque: f64,
    motor_speed: f64,
    brake_engaged: bool,
    motor_mode: String,
    energy_consumed: f64,
    average_power_consumed: f64,
    energy_generated: f64,
    average_power_generated: f64,
}

impl CsvRow {
    fn from_report(report: &StepReport<'_>) -> Self {
        let state = report.state;
        let result = report.result;
        Self {
            time: state.time,
            position: state.position,
            velocity: state.velocity,
            acceleration: state.acceleration,
            counterweight_position: state.counterweight_position,
            motor_torque: result.load.motor_torque,
            motor_speed: result.load.motor_speed,
            brake_engaged: result.brake.engaged,
            motor_mode: result.load.mode.to_string(),
            energy_consumed: state.energy.consumed,
            average_power_consumed: report.average_power_consumed_kw(),
            energy_generated: state.energy.generated,
            average_power_generated: report.average_power_generated_kw(),
        }
    }
}

/// 報告された刻みをCSVとして書き出す
pub struct CsvReporter<W: Write> {
    writer: ::csv::Writer<W>,
}

impl CsvReporter<File> {
    /// CSV出力の設定とヘッダーの書き込み
    pub fn create(path: &Path) -> Result<Self, SimulationError> {
        let file = File::create(path)?;
        Self::new(file)
    }
}

impl<W: Write> CsvReporter<W> {
    pub fn new(out: W) -> Result<Self, SimulationError> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        writer.write_record(HEADER)?;
        Ok(Self { writer })
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Result<W, SimulationError> {
        self.writer
            .into_inner()
            .map_err(|err| SimulationError::Io(err.into_error()))
    }
}

impl<W: Write> ReportSink for CsvReporter<W> {
    fn report(&mut self, report: &StepReport<'_>) -> Result<(), SimulationError> {
        self.writer.serialize(CsvRow::from_report(report))?;
        Ok(())
    }

    fn finish(&mut self, _summary: &RunSummary) -> Result<(), SimulationError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrakeOutcome, EnergyTotals, MotorLoad, MotorMode, PidState};
    use crate::simulation::{SimulationState, StepResult};

    fn snapshot() -> (SimulationState, StepResult) {
        let state = SimulationState {
            step: 2,
            time: 2.0,
            position: 6.0,
            velocity: 4.0,
            acceleration: 2.0,
            counterweight_position: 44.0,
            pid: PidState::default(),
            energy: EnergyTotals {
                consumed: 10000.0,
                generated: 0.0,
            },
        };
        let result = StepResult {
            desired_acceleration: 2.0,
            load: MotorLoad {
                gravity_force: -2452.5,
                air_force: 1.0,
                required_force: 3000.0,
                motor_force: 5451.5,
                motor_torque: 1362.875,
                angular_acceleration: 103.8,
                motor_speed: 8.0,
                power: 10903.0,
                mode: MotorMode::Traction,
            },
            brake: BrakeOutcome {
                acceleration: 2.0,
                brake_force: 0.0,
                engaged: false,
            },
        };
        (state, result)
    }

    #[test]
    fn test_csv_header_and_row() {
        let (state, result) = snapshot();
        let mut reporter = CsvReporter::new(Vec::new()).unwrap();
        reporter
            .report(&StepReport {
                state: &state,
                result: &result,
            })
            .unwrap();
        let bytes = reporter.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("time(s),cabin_position(m),"));
        assert_eq!(lines[0].split(',').count(), HEADER.len());

        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), HEADER.len());
        assert_eq!(fields[7], "false");
        assert_eq!(fields[8], "traction");
        let numeric: Vec<f64> = fields
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 7 && *i != 8)
            .map(|(_, f)| f.parse().unwrap())
            .collect();
        assert_eq!(
            numeric,
            vec![2.0, 6.0, 4.0, 2.0, 44.0, 1362.875, 8.0, 10000.0, 5.0, 0.0, 0.0]
        );
    }
}
