//! Trailing comma tolerance.

use std::borrow::Cow;

/// Drops a trailing comma that directly precedes `]` or `}`.
///
/// Commas inside strings are left alone, and a comma that follows `[`, `{`
/// or another comma is kept so that `[,]` and `[1,,]` stay invalid.
pub(crate) fn strip_trailing_commas(input: &[u8]) -> Cow<'_, [u8]> {
    let mut output: Option<Vec<u8>> = None;
    let mut in_string = false;
    let mut escaped = false;
    let mut previous: Option<u8> = None;

    for (i, &byte) in input.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
                previous = Some(byte);
            }
        } else if byte == b','
            && closes_next(&input[i + 1..])
            && !matches!(previous, None | Some(b'[' | b'{' | b','))
        {
            output.get_or_insert_with(|| input[..i].to_vec());
            continue;
        } else if byte == b'"' {
            in_string = true;
        } else if !byte.is_ascii_whitespace() {
            previous = Some(byte);
        }

        if let Some(out) = output.as_mut() {
            out.push(byte);
        }
    }

    output.map_or(Cow::Borrowed(input), Cow::Owned)
}

fn closes_next(rest: &[u8]) -> bool {
    rest.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| matches!(b, b']' | b'}'))
}
