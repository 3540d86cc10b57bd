use regex::Regex;
use std::sync::LazyLock;

/// `First_Last`: split at the first underscore that leaves a non-empty word
/// run on both sides. Either token may itself contain underscores.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<first>\w+?)_(?P<last>\w+)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// A name-card shot that opens a student's run.
    Marker { first: String, last: String },
    Member,
}

/// Classify a file stem (file name without extension).
pub fn classify(stem: &str) -> Classification {
    match MARKER_RE.captures(stem) {
        Some(caps) => Classification::Marker {
            first: caps["first"].to_string(),
            last: caps["last"].to_string(),
        },
        None => Classification::Member,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(first: &str, last: &str) -> Classification {
        Classification::Marker {
            first: first.to_string(),
            last: last.to_string(),
        }
    }

    #[test]
    fn test_markers() {
        assert_eq!(classify("Ann_Lee"), marker("Ann", "Lee"));
        assert_eq!(classify("Mary_Van_Dyke"), marker("Mary", "Van_Dyke"));
        assert_eq!(classify("Zoë_Ñúñez"), marker("Zoë", "Ñúñez"));
        assert_eq!(classify("Ann2_Lee"), marker("Ann2", "Lee"));
        assert_eq!(classify("Ann__Lee"), marker("Ann", "_Lee"));
        // camera names of this shape read as markers too
        assert_eq!(classify("IMG_0001"), marker("IMG", "0001"));
    }

    #[test]
    fn test_leading_underscore_markers() {
        // Canon Adobe RGB file names
        assert_eq!(classify("_MG_1234"), marker("_MG", "1234"));
        assert_eq!(classify("__Lee"), marker("_", "Lee"));
        assert_eq!(classify("_Ann_Lee_"), marker("_Ann", "Lee_"));
    }

    #[test]
    fn test_members() {
        assert_eq!(classify("IMG1"), Classification::Member);
        assert_eq!(classify("DSC-0001"), Classification::Member);
        assert_eq!(classify("Ann Lee"), Classification::Member);
        assert_eq!(classify("Ann-Marie_Lee"), Classification::Member);
        assert_eq!(classify("_Lee"), Classification::Member);
        assert_eq!(classify("Ann_"), Classification::Member);
        assert_eq!(classify(""), Classification::Member);
        assert_eq!(classify("photo (1)"), Classification::Member);
        assert_eq!(classify("_"), Classification::Member);
        assert_eq!(classify("__"), Classification::Member);
    }
}
