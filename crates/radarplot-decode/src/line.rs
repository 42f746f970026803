use encoding_rs::UTF_8;

use crate::{Record, Sample};

/// Sent once by the firmware when the sweep begins.
pub const START_MARKER: &str = "Radar Start";

/// Decode one raw line (terminator included or not) into a [`Record`].
///
/// Bytes that are not valid UTF-8 produce [`Record::Malformed`].
pub fn decode_line(bytes: &[u8]) -> Record {
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => classify(&text),
        None => {
            log::debug!("non-UTF-8 line: {}", hex::encode(bytes));
            Record::Malformed(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Classify an already decoded line. `\r` and `\n` are stripped anywhere in
/// the text before matching.
pub fn classify(text: &str) -> Record {
    let line: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();

    if line == START_MARKER {
        return Record::StartMarker;
    }

    let fields: Result<Vec<f64>, _> = line.split(',').map(|f| f.trim().parse::<f64>()).collect();
    match fields.as_deref() {
        Ok(&[angle, distance, ..]) => Record::Sample(Sample { angle, distance }),
        _ => Record::Malformed(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_marker_with_crlf() {
        assert_eq!(decode_line(b"Radar Start\r\n"), Record::StartMarker);
    }

    #[test]
    fn start_marker_is_exact() {
        assert_eq!(
            classify("Radar Start!"),
            Record::Malformed("Radar Start!".into())
        );
        assert_eq!(
            classify("radar start"),
            Record::Malformed("radar start".into())
        );
    }

    #[test]
    fn pair_is_a_sample() {
        assert_eq!(
            decode_line(b"90,42.5\n"),
            Record::Sample(Sample { angle: 90.0, distance: 42.5 })
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert_eq!(
            classify("10,20,30"),
            Record::Sample(Sample { angle: 10.0, distance: 20.0 })
        );
    }

    #[test]
    fn padded_fields_parse() {
        assert_eq!(
            classify(" 5 , 7.25\r"),
            Record::Sample(Sample { angle: 5.0, distance: 7.25 })
        );
    }

    #[test]
    fn single_field_is_malformed() {
        assert_eq!(classify("12"), Record::Malformed("12".into()));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(classify("garbage"), Record::Malformed("garbage".into()));
        assert_eq!(classify("1,abc"), Record::Malformed("1,abc".into()));
        assert_eq!(classify(""), Record::Malformed(String::new()));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(matches!(decode_line(&[0xff, 0xfe, b'\n']), Record::Malformed(_)));
    }
}
