use crate::table::SubstitutionTable;

pub fn apply_replacements(text: &str, table: &SubstitutionTable) -> String {
    apply_with_counts(text, table).0
}

/// Applies every pair in table order to the running result and returns the
/// number of replacements each pair made.
///
/// Matches are literal, case-sensitive and leftmost-first. Each pass copies
/// the text forward once and never rescans what it inserted, so a pair never
/// re-matches its own output.
pub fn apply_with_counts(text: &str, table: &SubstitutionTable) -> (String, Vec<usize>) {
    let mut result = text.to_string();
    let mut counts = Vec::with_capacity(table.len());
    for pair in table.iter() {
        let mut out = String::with_capacity(result.len());
        let mut count = 0;
        let mut i = 0;
        while let Some(pos) = result[i..].find(pair.from.as_str()) {
            let abs_pos = i + pos;
            out.push_str(&result[i..abs_pos]);
            out.push_str(&pair.to);
            i = abs_pos + pair.from.len();
            count += 1;
        }
        if count > 0 {
            out.push_str(&result[i..]);
            result = out;
        }
        counts.push(count);
    }
    (result, counts)
}
