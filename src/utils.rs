use std::io::{BufRead, Write};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{Res, chart::ChartKey};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Asks for a `YYYY-MM` month on `output` and reads one line from `input`.
///
/// The answer is validated before it is returned, so an invalid month never
/// reaches the fetcher.
pub fn prompt_chart_key<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Res<ChartKey> {
    write!(
        output,
        "Please select the month of the chart you would like to hear (YYYY-MM): "
    )?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err("No month given".into());
    }

    Ok(line.trim().parse::<ChartKey>()?)
}

/// Human readable byte size, e.g. `412.3 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
