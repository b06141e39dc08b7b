use std::collections::HashMap;

/// Normalize a column name into a lookup key: lower-case, with whitespace,
/// underscores, parentheses and hyphens removed.
///
/// `"Elevation (m)"`, `"elevation_m"` and `"ELEVATION-M"` all become `"elevationm"`.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '(' | ')' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One data line of the source table, keyed by normalized header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn from_pairs<K: AsRef<str>, V: Into<String>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (normalize_key(k.as_ref()), v.into()))
                .collect(),
        }
    }

    /// Text value of a column, matched by normalized name. Missing columns read as `""`.
    pub fn text(&self, wanted: &str) -> &str {
        self.fields
            .get(&normalize_key(wanted))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Numeric value of a column, or `NaN` when empty or unparsable.
    ///
    /// The first comma is read as a decimal separator (`"12,5"` is 12.5).
    pub fn number(&self, wanted: &str) -> f64 {
        parse_number(self.text(wanted))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lenient float parsing: replaces the first comma with a period, skips leading
/// whitespace and reads the longest decimal prefix. Non-finite results are `NaN`.
pub fn parse_number(raw: &str) -> f64 {
    let text = raw.replacen(',', ".", 1);
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

/// Split one line on `delim`, ignoring delimiters inside double-quoted segments.
///
/// A delimiter splits only when an even number of `"` follow it on the line.
pub fn split_fields(line: &str, delim: char) -> Vec<String> {
    let total_quotes = line.chars().filter(|&c| c == '"').count();
    let mut seen_quotes = 0;
    let mut fields = Vec::new();
    let mut current = String::new();

    for c in line.chars() {
        if c == '"' {
            seen_quotes += 1;
        }
        if c == delim && (total_quotes - seen_quotes) % 2 == 0 {
            fields.push(clean_field(&current));
            current.clear();
        } else {
            current.push(c);
        }
    }
    fields.push(clean_field(&current));
    fields
}

fn clean_field(raw: &str) -> String {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_string()
}

/// Pick the delimiter from the header line: `;` if present anywhere, else `,`.
pub fn detect_delimiter(header: &str) -> char {
    if header.contains(';') { ';' } else { ',' }
}

/// Parse delimiter-agnostic tabular text. The first non-blank line is the header;
/// blank lines are skipped and every other line becomes a [`Row`].
pub fn parse_table(text: &str) -> Vec<Row> {
    parse_lines(text.lines())
}

pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Row> {
    let mut lines = lines.into_iter();
    let Some(header_line) = lines.by_ref().find(|l| !l.trim().is_empty()) else {
        return Vec::new();
    };

    let delim = detect_delimiter(header_line);
    let keys: Vec<String> = split_fields(header_line, delim)
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let key = normalize_key(cell);
            if key.is_empty() { format!("col{idx}") } else { key }
        })
        .collect();

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = split_fields(line, delim).into_iter();
            let fields = keys
                .iter()
                .map(|key| (key.clone(), parts.next().unwrap_or_default()))
                .collect();
            Row { fields }
        })
        .collect()
}
