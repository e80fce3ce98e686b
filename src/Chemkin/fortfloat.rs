//! Fixed-field numeric reader for Fortran-style floating point text.
//!
//! Chemkin files inherit punch-card conventions: exponent letters `D`/`d`
//! instead of `E`/`e`, and a bare space standing in for the `+` sign between
//! mantissa and exponent (`1.0E 05`). All fixed-width fields in thermo and
//! kinetics entries go through [`fort_float`].

use crate::Chemkin::errors::ChemkinError;

/// Convert a string representation of a floating point value to `f64`,
/// allowing for the peculiarities of allowable Fortran representations:
/// `D`/`d` exponent letters and a space in place of the exponent `+` sign.
///
/// A field that is still unparseable after normalization fails with
/// `MalformedNumber` carrying the original (trimmed) text; it is never
/// silently defaulted.
pub fn fort_float(field: &str) -> Result<f64, ChemkinError> {
    let cleaned = field
        .trim()
        .replace('D', "E")
        .replace('d', "e")
        .replace("E ", "E+")
        .replace("e ", "e+");
    cleaned
        .parse::<f64>()
        .map_err(|_| ChemkinError::MalformedNumber {
            field: field.trim().to_string(),
        })
}

/// Slice a line to the fixed column window `[start, end)`, clamped to the
/// line length. Columns past the end of a short line yield an empty string,
/// matching the forgiving slicing the legacy format relies on; the caller's
/// numeric parse then decides whether that is fatal.
pub fn fixed_field(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    let start = start.min(len);
    let end = end.min(len);
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fortran_exponent_letters() {
        assert_relative_eq!(fort_float("1.0D+05").unwrap(), 1.0e5);
        assert_relative_eq!(fort_float("1.0d+05").unwrap(), 1.0e5);
        assert_relative_eq!(fort_float("-2.5D-03").unwrap(), -2.5e-3);
    }

    #[test]
    fn test_space_as_exponent_sign() {
        assert_relative_eq!(fort_float("1.0E 05").unwrap(), 1.0e5);
        assert_relative_eq!(fort_float("1.0d 05").unwrap(), 1.0e5);
    }

    #[test]
    fn test_accepted_and_rejected_set() {
        // the accepted set: a missing sign with no separating space is a
        // legal float literal and resolves as a positive exponent
        assert_relative_eq!(fort_float("1.0E05").unwrap(), 1.0e5);
        assert_relative_eq!(fort_float("  7.000  ").unwrap(), 7.0);
        assert_relative_eq!(fort_float("4").unwrap(), 4.0);
        // the rejected set: nothing insertable makes these unambiguous
        assert!(matches!(
            fort_float("1.0E"),
            Err(ChemkinError::MalformedNumber { .. })
        ));
        assert!(matches!(
            fort_float(""),
            Err(ChemkinError::MalformedNumber { .. })
        ));
        assert!(matches!(
            fort_float("abc"),
            Err(ChemkinError::MalformedNumber { .. })
        ));
        // the offending field text is preserved for diagnostics
        if let Err(ChemkinError::MalformedNumber { field }) = fort_float(" 1.0Q5 ") {
            assert_eq!(field, "1.0Q5");
        } else {
            panic!("expected MalformedNumber");
        }
    }

    #[test]
    fn test_fixed_field_clamping() {
        let line = "0123456789";
        assert_eq!(fixed_field(line, 0, 5), "01234");
        assert_eq!(fixed_field(line, 5, 50), "56789");
        assert_eq!(fixed_field(line, 20, 30), "");
    }
}
