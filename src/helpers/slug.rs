/// Kebab-case slug derivation: lowercase, hyphen-separated tokens.
///
/// Word boundaries are runs of non-alphanumeric characters plus
/// lower-to-upper and letter-to-digit transitions, so "PDF Editor" and
/// "pdfEditor" both slug to "pdf-editor".
pub fn kebab(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }

        let boundary = match prev {
            Some(p) => {
                (p.is_lowercase() && ch.is_uppercase())
                    || (p.is_alphabetic() && ch.is_numeric())
                    || (p.is_numeric() && ch.is_alphabetic())
            }
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }

        current.extend(ch.to_lowercase());
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}
