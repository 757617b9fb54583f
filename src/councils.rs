//! Directory of Victorian councils a resident can pick from.

use log::debug;

/// Most matches a directory search returns
pub const SEARCH_LIMIT: usize = 12;

/// Common names of Victorian councils, alphabetical
pub const VICTORIA_COUNCILS: &[&str] = &[
    "Alpine Shire",
    "Ararat Rural City",
    "Ballarat City",
    "Banyule City",
    "Bass Coast Shire",
    "Baw Baw Shire",
    "Benalla Rural City",
    "Boroondara City",
    "Brimbank City",
    "Buloke Shire",
    "Campaspe Shire",
    "Cardinia Shire",
    "Casey City",
    "Central Goldfields Shire",
    "Colac Otway Shire",
    "Corangamite Shire",
    "Darebin City",
    "East Gippsland Shire",
    "Gannawarra Shire",
    "Glen Eira City",
    "Glenelg Shire",
    "Golden Plains Shire",
    "Greater Bendigo City",
    "Greater Dandenong City",
    "Greater Geelong City",
    "Greater Shepparton City",
    "Hepburn Shire",
    "Hindmarsh Shire",
    "Hobsons Bay City",
    "Horsham Rural City",
    "Hume City",
    "Indigo Shire",
    "Kingston City",
    "Knox City",
    "Latrobe City",
    "Loddon Shire",
    "Macedon Ranges Shire",
    "Manningham City",
    "Mansfield Shire",
    "Maribyrnong City",
    "Maroondah City",
    "Melbourne City",
    "Melton City",
    "Mildura Rural City",
    "Mitchell Shire",
    "Moira Shire",
    "Monash City",
    "Moonee Valley City",
    "Moorabool Shire",
    "Merri-bek City",
    "Mornington Peninsula Shire",
    "Mount Alexander Shire",
    "Moyne Shire",
    "Murrindindi Shire",
    "Nillumbik Shire",
    "Northern Grampians Shire",
    "Port Phillip City",
    "Pyrenees Shire",
    "South Gippsland Shire",
    "Southern Grampians Shire",
    "Stonnington City",
    "Strathbogie Shire",
    "Surf Coast Shire",
    "Swan Hill Rural City",
    "Towong Shire",
    "Wangaratta Rural City",
    "Warrnambool City",
    "Wellington Shire",
    "West Wimmera Shire",
    "Whitehorse City",
    "Whittlesea City",
    "Wodonga City",
    "Wyndham City",
    "Yarra City",
    "Yarra Ranges Shire",
    "Yarriambiack Shire",
];

/// Case-insensitive substring search, at most [`SEARCH_LIMIT`] results in
/// directory order. A blank query lists the start of the directory.
pub fn search_councils(query: &str) -> Vec<&'static str> {
    let query = query.trim().to_lowercase();
    let matches: Vec<&'static str> = VICTORIA_COUNCILS
        .iter()
        .copied()
        .filter(|name| query.is_empty() || name.to_lowercase().contains(&query))
        .take(SEARCH_LIMIT)
        .collect();
    debug!("Council search '{}' matched {}", query, matches.len());
    matches
}

/// Directory spelling of a council name, matched case-insensitively
pub fn find_council(name: &str) -> Option<&'static str> {
    let name = name.trim();
    VICTORIA_COUNCILS
        .iter()
        .copied()
        .find(|council| council.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_query_lists_first_page() {
        let results = search_councils("   ");
        assert_eq!(results.len(), SEARCH_LIMIT);
        assert_eq!(results[0], "Alpine Shire");
        assert_eq!(results, &VICTORIA_COUNCILS[..SEARCH_LIMIT]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert_eq!(search_councils("YARRA"), vec!["Yarra City", "Yarra Ranges Shire"]);
        assert_eq!(
            search_councils("greater"),
            vec![
                "Greater Bendigo City",
                "Greater Dandenong City",
                "Greater Geelong City",
                "Greater Shepparton City"
            ]
        );
        assert!(search_councils("Sydney").is_empty());
    }

    #[test]
    fn test_search_caps_results() {
        let cities = search_councils("city");
        assert_eq!(cities.len(), SEARCH_LIMIT);
        assert_eq!(cities[0], "Ararat Rural City");
    }

    #[test]
    fn test_find_returns_directory_spelling() {
        assert_eq!(find_council(" melbourne city "), Some("Melbourne City"));
        assert_eq!(find_council("Melbourne"), None);
        assert_eq!(find_council(""), None);
    }
}
