//! Conversion commands
use anyhow::Context;
use bmglib::converter::{self, ConvertProgress};
use std::path::Path;

fn report(progress: &ConvertProgress) {
    tracing::debug!(
        "[{}/{}] {}: {}",
        progress.current,
        progress.total,
        progress.phase,
        progress.message.as_deref().unwrap_or("")
    );
}

pub fn bmg_to_xml(source: &Path, destination: &Path) -> anyhow::Result<()> {
    converter::convert_bmg_to_xml_with_progress(source, destination, &report).with_context(
        || format!("failed to convert {} to XML", source.display()),
    )?;
    println!("Converted {} → {}", source.display(), destination.display());
    Ok(())
}

pub fn xml_to_bmg(source: &Path, destination: &Path) -> anyhow::Result<()> {
    converter::convert_xml_to_bmg_with_progress(source, destination, &report).with_context(
        || format!("failed to convert {} to BMG", source.display()),
    )?;
    println!("Converted {} → {}", source.display(), destination.display());
    Ok(())
}
