//! Snapshot listing CLI command

use std::fs;
use std::path::Path;

use chrono::{Duration, Local};

use crate::config::settings::Settings;
use crate::error::SnapshotResult;
use crate::snapshot::destination::LATEST_NAME;
use crate::snapshot::lister::parse_snapshot_time;
use crate::snapshot::{list_snapshots, DestinationRoot, PathSpec, ProcessRunner};

/// Handle `snapshotter list`
pub fn handle_list_command(settings: &Settings, dest: &str) -> SnapshotResult<Vec<String>> {
    let dest = DestinationRoot::new(PathSpec::parse(dest), settings.remote_shell.clone());
    let snapshots = list_snapshots(&dest, &ProcessRunner::new())?;

    if snapshots.is_empty() {
        println!("No snapshots found in {}.", dest.spec());
        return Ok(snapshots);
    }

    println!("Snapshots in {}", dest.spec());
    println!();

    let now = Local::now().naive_local();
    for (i, name) in snapshots.iter().enumerate() {
        match parse_snapshot_time(name) {
            Some(taken) => println!(
                "  {}. {} ({} ago)",
                i + 1,
                name,
                format_duration(now.signed_duration_since(taken))
            ),
            None => println!("  {}. {}", i + 1, name),
        }
    }

    println!();
    println!("Total: {} snapshot(s)", snapshots.len());

    if !dest.is_remote() {
        if let Ok(target) = fs::read_link(Path::new(&dest.latest_path())) {
            println!("{} -> {}", LATEST_NAME, target.display());
        }
    }

    Ok(snapshots)
}

/// Format a duration in human-readable form
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    let days = hours / 24;
    if days < 30 {
        return format!("{}d", days);
    }

    format!("{}mo", days / 30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(42)), "42s");
        assert_eq!(format_duration(Duration::minutes(5)), "5m");
        assert_eq!(format_duration(Duration::hours(3)), "3h");
        assert_eq!(format_duration(Duration::days(2)), "2d");
        assert_eq!(format_duration(Duration::days(65)), "2mo");
        // Clock skew never shows a negative age
        assert_eq!(format_duration(Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_list_local_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("2015-03-05T16_24_15.snapshot")).unwrap();
        fs::create_dir(temp_dir.path().join("2015-03-05T16_23_12.snapshot")).unwrap();
        fs::create_dir(temp_dir.path().join("incomplete.snapshot")).unwrap();

        let listed =
            handle_list_command(&Settings::default(), &temp_dir.path().to_string_lossy())
                .unwrap();
        assert_eq!(
            listed,
            vec!["2015-03-05T16_23_12.snapshot", "2015-03-05T16_24_15.snapshot"]
        );
    }
}
