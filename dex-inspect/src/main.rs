use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod dex_file;
mod registry_init;

use crate::config::Config;
use crate::dex_file::DexFile;
use dex_core::{deserialize_event_group, DexError};

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    registry_init::initialize_registry();

    let text = std::fs::read_to_string(&config.file)
        .with_context(|| format!("failed to read '{}'", config.file.display()))?;
    let file = DexFile::parse(&text)?;

    info!(
        "Inspecting '{}' (dex version {}, {} events)",
        config.file.display(),
        file.version.as_deref().unwrap_or("unknown"),
        file.events.len()
    );

    let (deserialized, skipped) = inspect_events(&file, config.strict)?;
    info!("Done: {} groups deserialized, {} skipped", deserialized, skipped);

    Ok(())
}

/// Walk every event's groups through the registry
///
/// Unknown group types are skipped with a warning (or abort the run when
/// `strict` is set); malformed records always abort.
///
/// Returns the number of deserialized and skipped groups.
fn inspect_events(file: &DexFile, strict: bool) -> Result<(usize, usize)> {
    let mut deserialized = 0;
    let mut skipped = 0;

    for (index, event) in file.events.iter().enumerate() {
        let event_id = event.id.clone().unwrap_or_else(|| format!("#{index}"));

        for obj in &event.groups {
            match deserialize_event_group(obj) {
                Ok(group) => {
                    let time_range = match group.time_range() {
                        Some((start, end)) => format!("[{start}, {end}]"),
                        None => "none".to_string(),
                    };
                    info!(
                        "event {}: '{}' ({}, origin: {}, time range: {})",
                        event_id,
                        group.name(),
                        group.group_type(),
                        group.origin().unwrap_or("none"),
                        time_range
                    );
                    deserialized += 1;
                }
                Err(DexError::UnknownType { tag }) if !strict => {
                    warn!("event {}: skipping group of unknown type '{}'", event_id, tag);
                    skipped += 1;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("in event {event_id}"));
                }
            }
        }
    }

    Ok((deserialized, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> DexFile {
        DexFile::parse(
            r#"{
                "type": "firebird-dex-json",
                "version": "0.04",
                "events": [
                    {
                        "id": "event 0",
                        "groups": [
                            {
                                "type": "BoxTrackerHit",
                                "name": "barrel hits",
                                "hits": [
                                    {"position": [1, 2, 3], "dimensions": [0.1, 0.1, 0.1], "time": [5, 0.01]}
                                ]
                            },
                            {"type": "Ghost", "name": "unknown stuff"}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_inspect_skips_unknown_types() {
        registry_init::initialize_registry();

        let (deserialized, skipped) = inspect_events(&sample_file(), false).unwrap();
        assert_eq!(deserialized, 1);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_inspect_strict_fails_on_unknown_types() {
        registry_init::initialize_registry();

        assert!(inspect_events(&sample_file(), true).is_err());
    }

    #[test]
    fn test_inspect_aborts_on_malformed_record() {
        registry_init::initialize_registry();

        let file = DexFile::parse(
            r#"{
                "type": "firebird-dex-json",
                "events": [
                    {"id": "event 0", "groups": [{"type": "BoxTrackerHit", "name": "broken"}]}
                ]
            }"#,
        )
        .unwrap();

        // Registered type, missing payload: malformed, not skippable.
        assert!(inspect_events(&file, false).is_err());
    }
}
