/*!
 * Run Configuration
 *
 * One positional argument (the output path) plus optional environment
 * overrides:
 * - SCHED_RECORD_CAPACITY: bytes per serialized record (default: 64)
 * - SCHED_CHANNEL_SLOTS: record slots in the channel (default: 2)
 * - SCHED_VALUE_PRECISION: fractional digits in the output (default: 6)
 * - SCHED_PROCESS_TABLE: JSON process table (default: built-in table)
 */

use super::errors::ConfigError;
use super::limits::{
    DEFAULT_VALUE_PRECISION, ENV_CHANNEL_SLOTS, ENV_PROCESS_TABLE, ENV_RECORD_CAPACITY,
    ENV_VALUE_PRECISION, MAX_CHANNEL_SLOTS, MAX_RECORD_CAPACITY, MAX_VALUE_PRECISION,
    MIN_RECORD_CAPACITY,
};
use crate::ipc::ChannelConfig;
use crate::process::ProcessTable;
use std::ops::RangeInclusive;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub output: PathBuf,
    pub channel: ChannelConfig,
    pub precision: usize,
    pub process_table: Option<PathBuf>,
}

impl RunConfig {
    /// Defaults for everything but the output path
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            channel: ChannelConfig::default(),
            precision: DEFAULT_VALUE_PRECISION,
            process_table: None,
        }
    }

    /// Build from `argv` (program name first) and the process environment
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        Self::from_args_with(args, |key| std::env::var(key).ok())
    }

    /// Build from `argv` with an explicit variable lookup
    pub fn from_args_with<I, F>(args: I, lookup: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "sched-handoff".to_string());

        let output = match (args.next(), args.next()) {
            (Some(output), None) => output,
            _ => return Err(ConfigError::Usage { program }),
        };

        let mut config = Self::new(output);

        if let Some(raw) = lookup(ENV_RECORD_CAPACITY) {
            config.channel.record_capacity = parse_bounded(
                ENV_RECORD_CAPACITY,
                &raw,
                MIN_RECORD_CAPACITY..=MAX_RECORD_CAPACITY,
            )?;
        }
        if let Some(raw) = lookup(ENV_CHANNEL_SLOTS) {
            config.channel.slots = parse_bounded(ENV_CHANNEL_SLOTS, &raw, 1..=MAX_CHANNEL_SLOTS)?;
        }

        if let Some(raw) = lookup(ENV_VALUE_PRECISION) {
            config.precision = parse_bounded(ENV_VALUE_PRECISION, &raw, 0..=MAX_VALUE_PRECISION)?;
        }

        config.process_table = lookup(ENV_PROCESS_TABLE)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// The configured table, or the built-in one
    pub fn load_processes(&self) -> Result<ProcessTable, ConfigError> {
        match &self.process_table {
            Some(path) => ProcessTable::from_json_file(path),
            None => Ok(ProcessTable::builtin()),
        }
    }
}

fn parse_bounded(
    key: &'static str,
    raw: &str,
    range: RangeInclusive<usize>,
) -> Result<usize, ConfigError> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

    if !range.contains(&value) {
        return Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: format!("must be within {}..={}", range.start(), range.end()),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_args_with(args(&["prog", "out.txt"]), lookup(&[])).unwrap();
        assert_eq!(config, RunConfig::new("out.txt"));
        assert_eq!(config.precision, 6);
        assert_eq!(config.channel.slots, 2);
    }

    #[test]
    fn test_wrong_arity() {
        for argv in [vec!["prog"], vec!["prog", "a", "b"]] {
            let err = RunConfig::from_args_with(args(&argv), lookup(&[])).unwrap_err();
            assert!(matches!(err, ConfigError::Usage { ref program } if program == "prog"));
        }
    }

    #[test]
    fn test_overrides() {
        let config = RunConfig::from_args_with(
            args(&["prog", "out.txt"]),
            lookup(&[
                (ENV_RECORD_CAPACITY, "128"),
                (ENV_CHANNEL_SLOTS, " 4 "),
                (ENV_VALUE_PRECISION, "3"),
                (ENV_PROCESS_TABLE, "table.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.channel, ChannelConfig::new(128, 4).unwrap());
        assert_eq!(config.precision, 3);
        assert_eq!(config.process_table, Some(PathBuf::from("table.json")));
    }

    #[test]
    fn test_invalid_values() {
        for vars in [
            [(ENV_RECORD_CAPACITY, "lots")],
            [(ENV_RECORD_CAPACITY, "4")],
            [(ENV_CHANNEL_SLOTS, "0")],
            [(ENV_VALUE_PRECISION, "40")],
        ] {
            let err =
                RunConfig::from_args_with(args(&["prog", "out.txt"]), lookup(&vars)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{:?}", vars);
        }
    }

    #[test]
    fn test_builtin_table_by_default() {
        let config = RunConfig::new("out.txt");
        assert_eq!(config.load_processes().unwrap(), ProcessTable::builtin());
    }
}
