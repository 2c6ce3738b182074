// Collapses runs of whitespace and title-cases each word, so that
// " jane   doe " and "JANE DOE" store as the same display name.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(title_case)
        .collect::<Vec<String>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}
