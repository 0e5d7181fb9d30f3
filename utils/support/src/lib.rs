pub mod cycle;

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_handles_ascii_and_empty() {
        assert_eq!(capitalize_first("darkpaper"), "Darkpaper");
        assert_eq!(capitalize_first("Red"), "Red");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn capitalize_first_handles_multibyte() {
        assert_eq!(capitalize_first("émeraude"), "Émeraude");
    }
}
