//! CLI command implementation
//!
//! The conversion runs in two passes over the inputs:
//!
//! 1. ACCUMULATE - every record's mode fields are routed into the per-mode
//!    index maps
//! 2. BUILD - every map is finalized exactly once, in declared mode order
//! 3. EMIT - the inputs are re-read and each record becomes one tensor
//!    entry, looked up against the finalized maps; inverse map files are
//!    written last
//!
//! Re-reading instead of buffering keeps memory proportional to the number
//! of distinct keys, not the number of records.

use crate::config::{FieldSelector, TensorConfig};
use crate::index::{KeyOrder, ModeManager};
use crate::observability::{Logger, ObservationScope, Timer};
use crate::reader::RecordReader;
use crate::writer::{write_mode_maps, TensorWriter, WriterError};

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Parses arguments and runs the conversion. This is the whole program;
/// `main` only reports the error.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = build_config(&cli)?;
    convert(&config)
}

/// Assembles and validates a `TensorConfig` from parsed arguments.
pub fn build_config(cli: &Cli) -> CliResult<TensorConfig> {
    let mut config = TensorConfig::new(cli.csv.clone(), cli.output.clone());

    if let Some(sep) = &cli.field_sep {
        config.set_separator(sep)?;
    }
    if cli.no_header {
        config.set_no_header();
    }

    if cli.field.is_empty() {
        Logger::warn("NO_MODES", &[]);
    }
    for field in &cli.field {
        config.add_mode(FieldSelector::parse(field)?)?;
    }
    for field in &cli.sort_lex {
        config.set_mode_order(&FieldSelector::parse(field)?, KeyOrder::Lexicographic)?;
    }
    for field in &cli.sort_num {
        config.set_mode_order(&FieldSelector::parse(field)?, KeyOrder::Numeric)?;
    }
    if let Some(vals) = &cli.vals {
        config.set_value_field(FieldSelector::parse(vals)?);
    }
    if let Some(dir) = &cli.map_dir {
        config.set_map_dir(dir.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Runs one conversion described by `config`.
pub fn convert(config: &TensorConfig) -> CliResult<()> {
    let mode_names: Vec<String> = config
        .modes()
        .iter()
        .map(|m| m.field.to_string())
        .collect();
    let modes: Vec<(String, KeyOrder)> = mode_names
        .iter()
        .cloned()
        .zip(config.modes().iter().map(|m| m.order))
        .collect();
    let mut manager = ModeManager::new(&modes, config.value_field().map(|f| f.to_string()));

    let records = phase("ACCUMULATE", || {
        accumulate(config, &mut manager, &mode_names)
    })?;
    phase("BUILD", || {
        manager.build_all().map_err(CliError::from)?;
        Ok(manager.dims().len() as u64)
    })?;
    let entries = phase("EMIT", || emit(config, &manager, &mode_names))?;

    let dims: Vec<String> = manager.dims().iter().map(u64::to_string).collect();
    Logger::info(
        "CONVERT_COMPLETE",
        &[
            ("records", &records.to_string()),
            ("entries", &entries.to_string()),
            ("dims", &dims.join("x")),
            ("tensor", &config.output().display().to_string()),
        ],
    );
    Ok(())
}

/// Wraps one pipeline phase in an observation scope.
fn phase<F>(name: &str, body: F) -> CliResult<u64>
where
    F: FnOnce() -> CliResult<u64>,
{
    let scope = ObservationScope::new(name);
    let timer = Timer::new();
    match body() {
        Ok(count) => {
            scope.complete_with_fields(&[
                ("count", &count.to_string()),
                ("elapsed_ms", &timer.elapsed_ms()),
            ]);
            Ok(count)
        }
        Err(e) => {
            let reason = e.to_string();
            if e.is_fatal() {
                scope.fail_fatal(&reason);
            } else {
                scope.fail(&reason);
            }
            Err(e)
        }
    }
}

/// Pass 1: route every record's mode fields into the index maps.
fn accumulate(
    config: &TensorConfig,
    manager: &mut ModeManager,
    mode_names: &[String],
) -> CliResult<u64> {
    let mut records: u64 = 0;

    for path in config.inputs() {
        let mut reader = RecordReader::open(path, config.separator(), config.has_header())?;
        let columns = resolve_modes(config, &reader)?;

        while let Some(record) = reader.next_record()? {
            for (name, column) in mode_names.iter().zip(&columns) {
                let raw = reader.extract(&record, *column)?;
                manager.observe(name, raw)?;
            }
            records += 1;
        }
    }

    Ok(records)
}

/// Pass 2: re-read the inputs and write one tensor entry per record, then
/// the inverse map files.
fn emit(config: &TensorConfig, manager: &ModeManager, mode_names: &[String]) -> CliResult<u64> {
    let mut writer = TensorWriter::create(config.output())?;
    writer.write_header(&manager.dims())?;

    for path in config.inputs() {
        let mut reader = RecordReader::open(path, config.separator(), config.has_header())?;
        let columns = resolve_modes(config, &reader)?;
        let value_column = config
            .value_field()
            .map(|f| reader.resolve(f))
            .transpose()?;

        let mut indices = Vec::with_capacity(mode_names.len());
        while let Some(record) = reader.next_record()? {
            indices.clear();
            for (name, column) in mode_names.iter().zip(&columns) {
                let raw = reader.extract(&record, *column)?;
                indices.push(manager.lookup(name, raw)?);
            }

            let value = match value_column {
                Some(column) => {
                    let raw = reader.extract(&record, column)?;
                    if raw.trim().parse::<f64>().is_err() {
                        return Err(WriterError::BadValue {
                            value: raw.to_string(),
                            line: reader.line(),
                        }
                        .into());
                    }
                    raw
                }
                None => "1",
            };
            writer.write_entry(&indices, value)?;
        }
    }

    let entries = writer.entry_count();
    writer.finish()?;

    let maps = write_mode_maps(manager, config)?;
    for path in &maps {
        Logger::trace("MAP_WRITTEN", &[("path", &path.display().to_string())]);
    }

    Ok(entries)
}

/// Resolves every mode's column selector against one open reader.
fn resolve_modes(config: &TensorConfig, reader: &RecordReader) -> CliResult<Vec<usize>> {
    config
        .modes()
        .iter()
        .map(|m| reader.resolve(&m.field).map_err(CliError::from))
        .collect()
}
