//! Run command - fetch, filter and print a document

use anyhow::{bail, Context, Result};
use kfilter_core::{document, filter, Config, Format, RuleSet};
use std::borrow::Cow;
use std::io::{self, Write};
use tracing::{debug, info};

use crate::args::{detect_output_format, Args};
use crate::source::Source;

/// Execute the filter pipeline
pub fn execute(args: &Args, config: &Config, rules: &RuleSet) -> Result<()> {
    let requested = args
        .format
        .map(Format::from)
        .or_else(|| detect_output_format(&args.kubectl_args));

    let source = match args.input {
        Some(ref path) => Source::from_input(path.clone()),
        None => {
            // Checked before running kubectl so nothing is fetched for nothing.
            if requested.is_none() {
                bail!("please set -o flag to json or yaml");
            }
            Source::Kubectl {
                binary: config.kubectl.binary.clone(),
                args: args.kubectl_args.clone(),
            }
        }
    };

    let bytes = source.fetch()?;
    let format = requested.unwrap_or_else(|| document::sniff(&bytes));

    let output = filter_bytes(&bytes, rules, format, config.output.json_indent)?;
    info!(%format, rules = rules.len(), "Filtered document");

    if let Some(text) = output {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(terminated(&text).as_bytes())
            .context("Failed to write output")?;
    }

    Ok(())
}

/// Append a newline unless the text already ends with one
///
/// YAML output already ends in a newline and trailing blank lines may belong
/// to a keep-chomped block scalar, so existing text is never trimmed.
fn terminated(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

/// Decode, filter and re-encode a document
///
/// Returns `None` when the input holds no document.
pub fn filter_bytes(
    bytes: &[u8],
    rules: &RuleSet,
    format: Format,
    json_indent: usize,
) -> Result<Option<String>> {
    let mut doc = document::decode(bytes).context("Failed to decode document")?;

    filter::apply(doc.as_mut(), rules);

    match doc {
        Some(ref value) => Ok(Some(
            document::encode(value, format, json_indent).context("Failed to encode document")?,
        )),
        None => {
            debug!("Input is empty, nothing to print");
            Ok(None)
        }
    }
}
