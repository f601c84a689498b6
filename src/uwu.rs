//! UwU speak for panel labels

const REPLACEMENTS: &[(&str, &str)] = &[("r", "w"), ("l", "w"), ("th", "f")];

/// Rewrite `text` in UwU speak
///
/// Words containing `(` or `)` are left alone so key names like `(f3)`
/// survive. Whitespace collapses to single spaces.
pub fn uwu_speak(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            if word.contains('(') || word.contains(')') {
                word.to_string()
            } else {
                REPLACEMENTS
                    .iter()
                    .fold(word.to_string(), |acc, (from, to)| acc.replace(from, to))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
