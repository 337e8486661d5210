//! Delimited-text (CSV/TSV) row parsing.
//!
//! Quoted fields protect their interior delimiters behind a sentinel before
//! the split, then restore them. Escaped quote characters inside a quoted
//! field are not supported: every quote is consumed as a field boundary and
//! stripped from the output. An odd number of quotes on a line is an
//! unterminated field.

use indexmap::IndexMap;

use crimp_core::{Error, Result, Row};

/// Placeholder protecting delimiters inside quoted fields across the split.
const SENTINEL: &str = "[{c}]";

/// Parse a delimited body into rows.
///
/// Carriage returns are stripped before splitting on newlines. With `fields`
/// set, the first line names the columns and is excluded from the row set.
/// Strictly empty lines are skipped.
pub(crate) fn parse_rows(body: &str, delimiter: char, fields: bool) -> Result<Vec<Row>> {
    let normalized = body.replace('\r', "");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let columns: Vec<String> = if fields {
        lines
            .first()
            .map(|line| line.split(delimiter).map(str::to_string).collect())
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let start = usize::from(fields);
    let mut rows = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(start) {
        if line.is_empty() {
            continue;
        }
        let cells = split_line(line, delimiter, index + 1)?;

        if fields {
            let mut named = IndexMap::new();
            for (at, cell) in cells.into_iter().enumerate() {
                // Extra cells beyond the header are dropped
                if let Some(column) = columns.get(at) {
                    named.insert(column.clone(), cell);
                }
            }
            rows.push(Row::Named(named));
        } else {
            rows.push(Row::Cells(cells));
        }
    }

    Ok(rows)
}

/// Split one line into cells, honoring quoted fields.
fn split_line(line: &str, delimiter: char, line_number: usize) -> Result<Vec<String>> {
    if !line.contains('"') {
        return Ok(line.split(delimiter).map(str::to_string).collect());
    }

    if line.matches('"').count() % 2 != 0 {
        return Err(Error::unterminated_quote(line_number));
    }

    // Swap quoted-region delimiters for the sentinel, dropping the quotes
    let mut protected = String::with_capacity(line.len());
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && in_quotes => protected.push_str(SENTINEL),
            c => protected.push(c),
        }
    }

    let delimiter_str = delimiter.to_string();
    Ok(protected
        .split(delimiter)
        .map(|cell| cell.replace(SENTINEL, &delimiter_str))
        .collect())
}
