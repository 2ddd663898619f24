//! Line-level tokenization for the shotfile format.
//!
//! Handles the escape rules shared by the reader and writer: a
//! backslash makes the next character literal, so string fields can
//! carry commas, whitespace, `#`, and backslashes.

/// Characters the writer must escape inside a field.
const ESCAPED: &[char] = &['\\', ',', '#', ' ', '\t'];

/// Strip an unescaped `#` comment from a line.
pub fn strip_comment(line: &str) -> &str {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '#' {
            return &line[..i];
        }
    }
    line
}

/// Split a record line into unescaped fields.
///
/// Fields are separated by unescaped commas. Unescaped whitespace at
/// either end of a field is dropped; escaped whitespace is kept.
pub fn split_fields(line: &str) -> Vec<String> {
    // (char, was_escaped) stream per field, trimmed before unescaping
    // so `\ ` survives at a field edge.
    let mut fields = Vec::new();
    let mut field: Vec<(char, bool)> = Vec::new();
    let mut escaped = false;

    let mut flush = |field: &mut Vec<(char, bool)>| {
        while matches!(field.first(), Some((c, false)) if c.is_whitespace()) {
            field.remove(0);
        }
        while matches!(field.last(), Some((c, false)) if c.is_whitespace()) {
            field.pop();
        }
        fields.push(field.iter().map(|(c, _)| *c).collect::<String>());
        field.clear();
    };

    for c in line.chars() {
        if escaped {
            field.push((c, true));
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            flush(&mut field);
        } else {
            field.push((c, false));
        }
    }
    // A trailing lone backslash escapes nothing; drop it.
    flush(&mut field);
    fields
}

/// Escape a string field for embedding in a record line.
pub fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("RAY,1,0 # fired at hull"), "RAY,1,0 ");
        assert_eq!(strip_comment("no comment here"), "no comment here");
        assert_eq!(strip_comment(r"name\#1,2"), r"name\#1,2");
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(split_fields("RAY,1, 0 ,2"), vec!["RAY", "1", "0", "2"]);
    }

    #[test]
    fn test_split_escaped_comma() {
        assert_eq!(split_fields(r"HIT,a\,b,c"), vec!["HIT", "a,b", "c"]);
    }

    #[test]
    fn test_split_escaped_whitespace_kept() {
        assert_eq!(split_fields(r"a\ ,b"), vec!["a ", "b"]);
    }

    #[test]
    fn test_escape_round_trip() {
        let ugly = r"r.hull #2, left\side";
        let fields = split_fields(&escape_field(ugly));
        assert_eq!(fields, vec![ugly]);
    }
}
