//! Init command - write the default policy file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};

use anyhow::Context;
use clash_config::{DEFAULT_POLICY_YAML, POLICY_FILE_NAME};

use super::detect_context;
use crate::theme::Theme;

/// Write the embedded defaults to `<repo root or cwd>/clash.yaml`.
///
/// Refuses to overwrite an existing file.
pub(crate) fn run_init() -> anyhow::Result<()> {
    let ctx = detect_context()?;
    let target = ctx.root_or_cwd().join(POLICY_FILE_NAME);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("{} already exists", target.display());
        },
        Err(e) => {
            return Err(e).with_context(|| format!("failed to create {}", target.display()));
        },
    };
    file.write_all(DEFAULT_POLICY_YAML.as_bytes())
        .with_context(|| format!("failed to write {}", target.display()))?;

    println!(
        "{}",
        Theme::success(&format!("Created {}", target.display()))
    );
    Ok(())
}
