use std::io::BufReader;
use std::process::{Command, Stdio};

use diffexfat::oracle::{offsets, CmpListing};
use diffexfat::{ClassifiedOffsets, Comparison};

use crate::error::Error;

/// Classify the differences reported by an external `cmp -l`
pub fn classify(comparison: &Comparison, old: &str, new: &str) -> Result<ClassifiedOffsets, Error> {
    let command = format!("cmp -l {} {}", old, new);
    debug!("Spawn {}", command);
    let mut child = Command::new("cmp")
        .args(["-l", old, new])
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn { command: command.clone(), source })?;
    let stdout = match child.stdout.take() {
        Some(stdout) => stdout,
        None => return Err(Error::String("cmp stdout unavailable")),
    };
    let result = comparison.classify(offsets(CmpListing::new(BufReader::new(stdout))));
    if result.is_err() {
        child.kill().ok();
    }
    let status = child.wait()?;
    let classified = result?;
    // 0 for identical, 1 for different, anything else is trouble
    match status.code() {
        Some(0 | 1) => Ok(classified),
        _ => Err(Error::Status { command, status }),
    }
}
