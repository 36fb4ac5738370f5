//! `acs schedules` and `acs employees`: stored JSON documents.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use acs_store::{Collection, ConfigStore};
use anyhow::{Context, Result};
use serde_json::Value;

use crate::DocumentAction;

pub fn run<W: Write>(
    out: &mut W,
    store: &ConfigStore,
    collection: Collection,
    action: &DocumentAction,
) -> Result<()> {
    match action {
        DocumentAction::Show => show(out, store, collection),
        DocumentAction::Set { file } => {
            let input = open_input(file.as_deref())?;
            set(store, collection, input)?;
            writeln!(
                out,
                "Saved {collection} to {}",
                store.path(collection).display()
            )?;
            Ok(())
        }
    }
}

/// Prints the stored document as pretty JSON.
pub fn show<W: Write>(out: &mut W, store: &ConfigStore, collection: Collection) -> Result<()> {
    let document = store
        .read(collection)
        .with_context(|| format!("failed to read {collection}"))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

/// Replaces the stored document with the JSON read from `input`.
///
/// Invalid JSON leaves the stored document untouched.
pub fn set<R: Read>(store: &ConfigStore, collection: Collection, input: R) -> Result<()> {
    let document: Value = serde_json::from_reader(input)
        .with_context(|| format!("{collection} input is not valid JSON"))?;
    store
        .write(collection, &document)
        .with_context(|| format!("failed to save {collection}"))
}

/// Opens `file`, or stdin when it is absent or `-`.
fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}
