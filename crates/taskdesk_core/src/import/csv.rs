//! Minimal CSV tokenizer and writer for spreadsheet round trips.
//!
//! Reading splits on line breaks, skips blank and `#` reference lines, and
//! lets a double quote toggle quoting so commas inside quotes stay in the
//! cell. Inside quotes `""` is a literal quote, matching `escape_cell`.
//! Quoted line breaks are not supported on input.

/// Tokenizes `text` into trimmed cells per non-blank line.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.trim_start().starts_with('#'))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Quotes `cell` when it holds a comma, quote or line break.
pub fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Joins a header and rows into CSV text separated by `\n`.
pub fn write_csv<S: AsRef<str>>(header: &[&str], rows: &[Vec<S>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header
            .iter()
            .map(|cell| escape_cell(cell))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| escape_cell(cell.as_ref()))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{escape_cell, parse_rows, write_csv};

    #[test]
    fn quoted_commas_stay_in_one_cell() {
        let rows = parse_rows("Name,GSTIN\r\n\"Acme, Ltd\" , 27AAB\n\n# comment\n");
        assert_eq!(
            rows,
            vec![
                vec!["Name".to_string(), "GSTIN".to_string()],
                vec!["Acme, Ltd".to_string(), "27AAB".to_string()],
            ]
        );
    }

    #[test]
    fn doubled_quotes_read_back_as_one() {
        let text = write_csv(&["Comment"], &[vec!["Ask for \"Form 16\", then file"]]);
        assert_eq!(text, "Comment\n\"Ask for \"\"Form 16\"\", then file\"");
        assert_eq!(
            parse_rows(&text)[1],
            vec!["Ask for \"Form 16\", then file".to_string()]
        );
        assert_eq!(parse_rows("\"\"\"\"")[0], vec!["\"".to_string()]);
    }

    #[test]
    fn escape_doubles_quotes() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn write_csv_emits_header_first() {
        let text = write_csv(&["A", "B"], &[vec!["1", "x,y"]]);
        assert_eq!(text, "A,B\n1,\"x,y\"");
    }
}
