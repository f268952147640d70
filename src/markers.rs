//! Marker scanning for `#<keep>` / `#</keep>` delimited regions
//!
//! Code cells mark scaffolding with paired `#<keep>` and `#</keep>` lines. Both
//! tokens must sit at the start of a line and be followed by a newline, except
//! that a cell may end with `#</keep>` without a trailing newline. Only
//! well-formed sequential pairs are recognized; unpaired or nested markers are
//! not a construct and simply fail to match.

use regex::Regex;

use crate::errors::AppError;

/// Extract the concatenation of all marker-delimited regions in `source`
///
/// Matching is non-greedy per pair, so consecutive pairs each contribute their
/// own span. The marker lines themselves are excluded. If no pair exists the
/// result is the empty string.
pub fn extract_kept_regions(source: &str) -> Result<String, AppError> {
    let regex = Regex::new(r"(?ms)^#<keep>\n(.*?)^#</keep>(?:\n|\z)")?;

    Ok(regex
        .captures_iter(source)
        .filter_map(|captures| captures.get(1))
        .map(|region| region.as_str())
        .collect())
}

/// Remove bare marker lines from `source`, leaving all other text intact
///
/// Used when rendering the instructor copy: the solution code between markers
/// stays, only the `#<keep>` / `#</keep>` lines disappear.
pub fn strip_marker_lines(source: &str) -> Result<String, AppError> {
    let regex = Regex::new(r"(?m)^#</?keep>(?:\n|\z)")?;

    Ok(regex.replace_all(source, "").into_owned())
}
