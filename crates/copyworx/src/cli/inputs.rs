//! Form input parsing for `copyworx start`.

use copyworx_core::FormInputs;
use std::path::Path;

/// Parse a `key=value` argument. Whitespace around the key is trimmed; the
/// value is kept verbatim and may contain further `=` signs.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", arg));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Read form inputs from a `.json` or `.toml` file of string values.
pub fn load_inputs_file(path: &Path) -> anyhow::Result<FormInputs> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let inputs = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid TOML in {}: {}", path.display(), e))?,
        _ => serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))?,
    };
    Ok(inputs)
}

/// Merge file inputs with command-line pairs; command-line values win.
pub fn collect_inputs(
    file: Option<&Path>,
    pairs: Vec<(String, String)>,
) -> anyhow::Result<FormInputs> {
    let mut inputs = match file {
        Some(path) => load_inputs_file(path)?,
        None => FormInputs::new(),
    };
    for (key, value) in pairs {
        inputs.insert(key, value);
    }
    Ok(inputs)
}
