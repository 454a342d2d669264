//! String normalization shared by product and category names.

/// Trim `raw` and convert it to title case.
///
/// A letter is upper-cased when it is not preceded by another letter and
/// lower-cased otherwise, so `"  fresh RED apples"` becomes `"Fresh Red Apples"`
/// and `"o'neil"` becomes `"O'Neil"`. Applying it twice yields the same result
/// as applying it once.
pub fn normalize_title(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_is_letter = false;

    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                // Multi-char uppercase forms (e.g. 'ß' -> "SS") keep only the
                // leading char upper-cased.
                let mut upper = ch.to_uppercase();
                if let Some(first) = upper.next() {
                    out.push(first);
                }
                out.extend(upper.flat_map(char::to_lowercase));
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}

/// Case-insensitive key used to compare normalized names.
pub(crate) fn name_key(name: &str) -> String {
    normalize_title(name).to_lowercase()
}
