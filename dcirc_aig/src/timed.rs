//! Naming convention for per-timestep copies of ports.
//!
//! Unrolling a circuit copies each port once per step as `<name>##time_<t>`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TIMED_NAME_RE: Regex = Regex::new(r"^(.*)##time_(\d+)$").unwrap();
}

/// The name of port `name` at step `time`.
#[must_use]
pub fn timed_name(name: &str, time: usize) -> String {
    format!("{name}##time_{time}")
}

/// Split a timed name into its base name and step.
#[must_use]
pub fn split_timed_name(name: &str) -> Option<(&str, usize)> {
    let caps = TIMED_NAME_RE.captures(name)?;
    let base = caps.get(1)?.as_str();
    let time = caps.get(2)?.as_str().parse().ok()?;
    Some((base, time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("x##time_0", Some(("x", 0)))]
    #[case("acc##time_12", Some(("acc", 12)))]
    #[case("##valid##time_3", Some(("##valid", 3)))]
    #[case("a##time_1##time_2", Some(("a##time_1", 2)))]
    #[case("x", None)]
    #[case("x##time_", None)]
    fn test_split_timed_name(#[case] name: &str, #[case] expected: Option<(&str, usize)>) {
        assert_eq!(split_timed_name(name), expected);
    }

    #[test]
    fn test_timed_name_roundtrip() {
        let name = timed_name("##valid#7", 4);
        assert_eq!(name, "##valid#7##time_4");
        assert_eq!(split_timed_name(&name), Some(("##valid#7", 4)));
    }
}
