//! Display helpers for PokeAPI identifiers.

/// Strip form prefixes and turn the first hyphen into a space.
///
/// Only the first occurrence of each pattern is touched, so
/// `"mr-mime-galar"` becomes `"mr mime-galar"`.
pub fn clean_name(name: &str) -> String {
    name.replacen("extended-", "", 1)
        .replacen("original-", "", 1)
        .replacen('-', " ", 1)
}

/// Upper-case the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Last non-empty path segment of a resource URL, e.g. the species id in
/// `https://pokeapi.co/api/v2/pokemon-species/25/`.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.split('/').filter(|s| !s.is_empty()).next_back()?.parse().ok()
}

/// `#0025` style dex number.
pub fn dex_number(id: u32) -> String {
    format!("#{:04}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_strips_form_prefix() {
        assert_eq!(clean_name("original-pikachu"), "pikachu");
        assert_eq!(clean_name("extended-kanto"), "kanto");
    }

    #[test]
    fn clean_name_replaces_first_hyphen() {
        assert_eq!(clean_name("tapu-koko"), "tapu koko");
        assert_eq!(clean_name("mr-mime-galar"), "mr mime-galar");
        assert_eq!(clean_name("level-up"), "level up");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("mew"), "Mew");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn id_from_trailing_slash_url() {
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon-species/25/"), Some(25));
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/pokemon-species/133"), Some(133));
        assert_eq!(id_from_url("https://pokeapi.co/api/v2/type/fire/"), None);
    }

    #[test]
    fn dex_number_pads_to_four() {
        assert_eq!(dex_number(25), "#0025");
        assert_eq!(dex_number(1025), "#1025");
    }
}
