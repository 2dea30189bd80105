//! Video duration tokens.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// `P[nD]T[nH][nM][nS]`, matched at the start of the token like the API
/// emits it. Live and upcoming videos report `P0D`.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?")
        .unwrap_or_else(|e| panic!("duration pattern must compile: {e}"))
});

/// Parses a duration token into whole seconds.
///
/// Absent components count as zero, and so does an empty or unrecognised
/// token. A component too large to represent is an error so the caller
/// can fail the one video instead of recording a bogus length.
///
/// ```
/// use ytdata_core::parse_duration;
///
/// assert_eq!(parse_duration("PT1H2M3S").unwrap(), 3723);
/// assert_eq!(parse_duration("PT45S").unwrap(), 45);
/// assert_eq!(parse_duration("").unwrap(), 0);
/// ```
pub fn parse_duration(token: &str) -> Result<u64, CoreError> {
    let Some(caps) = DURATION_RE.captures(token.trim()) else {
        return Ok(0);
    };

    let component = |idx: usize| -> Result<u64, CoreError> {
        caps.get(idx).map_or(Ok(0), |m| {
            m.as_str().parse::<u64>().map_err(|e| {
                CoreError::InvalidData(format!("duration component in {token:?}: {e}"))
            })
        })
    };

    let days = component(1)?;
    let hours = component(2)?;
    let minutes = component(3)?;
    let seconds = component(4)?;

    [(days, 86_400), (hours, 3_600), (minutes, 60), (seconds, 1)]
        .into_iter()
        .try_fold(0u64, |total, (value, unit)| {
            value
                .checked_mul(unit)
                .and_then(|secs| total.checked_add(secs))
        })
        .ok_or_else(|| CoreError::InvalidData(format!("duration overflows: {token:?}")))
}
