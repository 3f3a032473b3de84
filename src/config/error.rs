// src/config/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// パラメータの読み込み時に発生するエラー
///
/// いずれも致命的であり、シミュレーションは開始されない。
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} を開けません: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} のCSV解析に失敗しました: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} のYAML解析に失敗しました: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{table} にパラメータ `{name}` がありません")]
    MissingParameter { table: String, name: String },

    #[error("{table} に行 `{name}` がありません")]
    MissingRow { table: String, name: String },

    #[error("パラメータ `{name}` の値 `{value}` は数値ではありません")]
    NonNumeric { name: String, value: String },

    #[error(transparent)]
    Invalid(#[from] InvalidConfigError),
}

/// 物理的に意味を持たないパラメータ値
///
/// 値を黙ってクランプすることはせず、起動時にエラーとする。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfigError {
    #[error("`{name}` は正の値でなければなりません (値: {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("`{name}` は負であってはなりません (値: {value})")]
    Negative { name: &'static str, value: f64 },

    #[error("`{name}` が有限値ではありません (値: {value})")]
    NotFinite { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ConfigError::MissingRow {
            table: "data/elevator_params.csv".to_string(),
            name: "cage_mass".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("cage_mass"));
        assert!(message.contains("elevator_params.csv"));

        let err: ConfigError = InvalidConfigError::NotPositive {
            name: "dt",
            value: 0.0,
        }
        .into();
        assert!(err.to_string().contains("`dt`"));
    }
}
