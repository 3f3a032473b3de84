// src/simulation/load_parameters.rs

use std::fs::{self, File};
use std::path::Path;

use tracing::{info, warn};

use crate::config::{
    ConfigError, ControlConstants, ElevatorParameters, MotorRatings, SimulationConfig,
};

/// モータ定格の表
pub const MOTOR_FILE: &str = "motor_other.csv";
/// エレベータ機械パラメータの表
pub const ELEVATOR_FILE: &str = "elevator_params.csv";

fn open_csv(path: &Path) -> Result<csv::Reader<File>, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn csv_error(path: &Path) -> impl Fn(csv::Error) -> ConfigError + '_ {
    move |source| ConfigError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// 文字列を数値として解釈する
fn parse_numeric(name: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::NonNumeric {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

/// ヘッダー付きの表から一列目のデータ行の値を取り出す
fn column_value(
    table: &str,
    headers: &csv::StringRecord,
    record: Option<&csv::StringRecord>,
    name: &str,
) -> Result<f64, ConfigError> {
    let missing = || ConfigError::MissingParameter {
        table: table.to_string(),
        name: name.to_string(),
    };
    let index = headers.iter().position(|h| h == name).ok_or_else(missing)?;
    let raw = record.and_then(|r| r.get(index)).ok_or_else(missing)?;
    parse_numeric(name, raw)
}

/// モータ定格の読み込み
///
/// 先頭のデータ行を用いる。プーリ直径はmmからmに換算する。
pub fn load_motor_ratings(path: &Path) -> Result<MotorRatings, ConfigError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let first = reader.records().next().transpose().map_err(csv_error(path))?;

    let table = path.display().to_string();
    let value = |name: &str| column_value(&table, &headers, first.as_ref(), name);

    let ratings = MotorRatings {
        power: value("Pmotor")?,
        stator_resistance: value("Rs_pred")?,
        max_acceleration: value("max_a")?,
        min_acceleration: value("min_a")?,
        max_velocity: value("max_v")?,
        pulley_diameter: value("pulley_dia")? / 1000.0,
    };
    info!(path = %path.display(), ?ratings, "loaded motor ratings");
    Ok(ratings)
}

/// エレベータ機械パラメータの読み込み
///
/// `Parameter` 列の名前で行を探し、`Value` 列を数値として読む。
pub fn load_elevator_parameters(path: &Path) -> Result<ElevatorParameters, ConfigError> {
    let mut reader = open_csv(path)?;
    let headers = reader.headers().map_err(csv_error(path))?.clone();
    let table = path.display().to_string();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ConfigError::MissingParameter {
                table: table.clone(),
                name: name.to_string(),
            })
    };
    let name_index = column("Parameter")?;
    let value_index = column("Value")?;

    let rows: Vec<(String, String)> = reader
        .records()
        .map(|record| {
            record.map(|r| {
                (
                    r.get(name_index).unwrap_or_default().to_string(),
                    r.get(value_index).unwrap_or_default().to_string(),
                )
            })
        })
        .collect::<Result<_, _>>()
        .map_err(csv_error(path))?;

    let row = |name: &str| -> Result<f64, ConfigError> {
        let (_, raw) = rows
            .iter()
            .find(|(parameter, _)| parameter == name)
            .ok_or_else(|| ConfigError::MissingRow {
                table: table.clone(),
                name: name.to_string(),
            })?;
        parse_numeric(name, raw)
    };

    let parameters = ElevatorParameters {
        cage_mass: row("cage_mass")?,
        carrying_capacity: row("carrying_capacity")?,
        counterweight_mass: row("counterweight_mass")?,
    };
    info!(path = %path.display(), ?parameters, "loaded elevator parameters");
    Ok(parameters)
}

/// シナリオ (制御定数) の読み込み
///
/// 空のファイルは既定値として扱う。
pub fn load_control_constants(path: &Path) -> Result<ControlConstants, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let constants = if contents.trim().is_empty() {
        ControlConstants::default()
    } else {
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    info!(path = %path.display(), ?constants, "loaded scenario");
    Ok(constants)
}

/// データディレクトリの表と制御定数から設定を構築する
pub fn load_simulation_config(
    data_dir: &Path,
    constants: ControlConstants,
) -> Result<SimulationConfig, ConfigError> {
    let motor = load_motor_ratings(&data_dir.join(MOTOR_FILE))?;
    let elevator = load_elevator_parameters(&data_dir.join(ELEVATOR_FILE))?;
    let config = SimulationConfig::new(motor, elevator, constants)?;

    if config.is_overloaded() {
        warn!(
            passenger_load = config.constants.passenger_load,
            carrying_capacity = config.elevator.carrying_capacity,
            "passenger load exceeds carrying capacity"
        );
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::InvalidConfigError;
    use approx::assert_relative_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const MOTOR_CSV: &str = "Pmotor,Rs_pred,max_a,min_a,max_v,pulley_dia\n15000,0.5,2.0,-2.0,2.5,500\n";
    const ELEVATOR_CSV: &str = "Parameter,Value\ncage_mass,1000\ncarrying_capacity,1000\ncounterweight_mass,1250\n";

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_motor_ratings_converts_mm() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, MOTOR_FILE, MOTOR_CSV);
        let ratings = load_motor_ratings(&path).unwrap();

        assert_relative_eq!(ratings.power, 15000.0);
        assert_relative_eq!(ratings.max_acceleration, 2.0);
        assert_relative_eq!(ratings.min_acceleration, -2.0);
        assert_relative_eq!(ratings.pulley_diameter, 0.5);
    }

    #[test]
    fn test_load_motor_ratings_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, MOTOR_FILE, "Pmotor,Rs_pred,max_a,min_a,pulley_dia\n1,2,3,4,5\n");
        let err = load_motor_ratings(&path).unwrap_err();

        match err {
            ConfigError::MissingParameter { name, .. } => assert_eq!(name, "max_v"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_motor_ratings_non_numeric() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            MOTOR_FILE,
            "Pmotor,Rs_pred,max_a,min_a,max_v,pulley_dia\n15000,0.5,fast,-2.0,2.5,500\n",
        );
        let err = load_motor_ratings(&path).unwrap_err();

        match err {
            ConfigError::NonNumeric { name, value } => {
                assert_eq!(name, "max_a");
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_motor_ratings_without_data_row() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, MOTOR_FILE, "Pmotor,Rs_pred,max_a,min_a,max_v,pulley_dia\n");
        let err = load_motor_ratings(&path).unwrap_err();

        assert!(matches!(err, ConfigError::MissingParameter { .. }));
    }

    #[test]
    fn test_load_elevator_parameters() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, ELEVATOR_FILE, ELEVATOR_CSV);
        let parameters = load_elevator_parameters(&path).unwrap();

        assert_relative_eq!(parameters.cage_mass, 1000.0);
        assert_relative_eq!(parameters.carrying_capacity, 1000.0);
        assert_relative_eq!(parameters.counterweight_mass, 1250.0);
    }

    #[test]
    fn test_load_elevator_parameters_missing_row() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            ELEVATOR_FILE,
            "Parameter,Value\ncarrying_capacity,1000\ncounterweight_mass,1250\n",
        );
        let err = load_elevator_parameters(&path).unwrap_err();

        match err {
            ConfigError::MissingRow { name, .. } => assert_eq!(name, "cage_mass"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_motor_ratings(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_control_constants() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "scenario.yaml", "target_height: 10000.0\nmax_time: 5.0\n");
        let constants = load_control_constants(&path).unwrap();

        assert_eq!(constants.target_height, 10000.0);
        assert_eq!(constants.max_time, 5.0);
        assert_eq!(constants.dt, 1.0);
    }

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let empty = write(&dir, "empty.yaml", "\n");
        assert_eq!(load_control_constants(&empty).unwrap(), ControlConstants::default());

        let blank = write(&dir, "blank.yaml", "   \n\t\n");
        assert_eq!(load_control_constants(&blank).unwrap(), ControlConstants::default());
    }

    #[test]
    fn test_load_simulation_config_rejects_zero_pulley() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            MOTOR_FILE,
            "Pmotor,Rs_pred,max_a,min_a,max_v,pulley_dia\n15000,0.5,2.0,-2.0,2.5,0\n",
        );
        write(&dir, ELEVATOR_FILE, ELEVATOR_CSV);
        let err = load_simulation_config(dir.path(), ControlConstants::default()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid(InvalidConfigError::NotPositive { name: "pulley_dia", .. })
        ));
    }

    #[test]
    fn test_load_simulation_config() {
        let dir = TempDir::new().unwrap();
        write(&dir, MOTOR_FILE, MOTOR_CSV);
        write(&dir, ELEVATOR_FILE, ELEVATOR_CSV);
        let config = load_simulation_config(dir.path(), ControlConstants::default()).unwrap();

        assert_relative_eq!(config.cabin_mass, 1500.0);
        assert_relative_eq!(config.pulley_radius, 0.25);
    }
}
