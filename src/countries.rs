//! Static catalog of countries supported by the trends feed.
//!
//! The list mirrors the Google Trends country coverage. The home country and
//! the United States are pinned to the top; the remainder is sorted by the
//! local (Korean) display name.

/// One selectable country in the dashboard header.
pub struct CountryOption {
    /// ISO-3166 alpha-2 code used in feed URLs.
    pub code: &'static str,
    /// Display name in the dashboard's home language.
    pub name_local: &'static str,
    /// English display name.
    pub name_english: &'static str,
    /// Flag emoji shown next to the name.
    pub flag: &'static str,
}

/// Country whose feed is already in the home language; translation is never
/// applied to it and the language toggle is hidden.
pub const HOME_COUNTRY: &str = "KR";

pub const COUNTRIES: &[CountryOption] = &[
    // Pinned
    CountryOption { code: "KR", name_local: "대한민국", name_english: "South Korea", flag: "🇰🇷" },
    CountryOption { code: "US", name_local: "미국", name_english: "United States", flag: "🇺🇸" },
    // Sorted by Korean name
    CountryOption { code: "GR", name_local: "그리스", name_english: "Greece", flag: "🇬🇷" },
    CountryOption { code: "ZA", name_local: "남아프리카공화국", name_english: "South Africa", flag: "🇿🇦" },
    CountryOption { code: "NL", name_local: "네덜란드", name_english: "Netherlands", flag: "🇳🇱" },
    CountryOption { code: "NO", name_local: "노르웨이", name_english: "Norway", flag: "🇳🇴" },
    CountryOption { code: "NZ", name_local: "뉴질랜드", name_english: "New Zealand", flag: "🇳🇿" },
    CountryOption { code: "NG", name_local: "나이지리아", name_english: "Nigeria", flag: "🇳🇬" },
    CountryOption { code: "TW", name_local: "대만", name_english: "Taiwan", flag: "🇹🇼" },
    CountryOption { code: "DK", name_local: "덴마크", name_english: "Denmark", flag: "🇩🇰" },
    CountryOption { code: "DE", name_local: "독일", name_english: "Germany", flag: "🇩🇪" },
    CountryOption { code: "RU", name_local: "러시아", name_english: "Russia", flag: "🇷🇺" },
    CountryOption { code: "RO", name_local: "루마니아", name_english: "Romania", flag: "🇷🇴" },
    CountryOption { code: "MY", name_local: "말레이시아", name_english: "Malaysia", flag: "🇲🇾" },
    CountryOption { code: "MX", name_local: "멕시코", name_english: "Mexico", flag: "🇲🇽" },
    CountryOption { code: "VN", name_local: "베트남", name_english: "Vietnam", flag: "🇻🇳" },
    CountryOption { code: "BE", name_local: "벨기에", name_english: "Belgium", flag: "🇧🇪" },
    CountryOption { code: "BR", name_local: "브라질", name_english: "Brazil", flag: "🇧🇷" },
    CountryOption { code: "SA", name_local: "사우디아라비아", name_english: "Saudi Arabia", flag: "🇸🇦" },
    CountryOption { code: "SE", name_local: "스웨덴", name_english: "Sweden", flag: "🇸🇪" },
    CountryOption { code: "CH", name_local: "스위스", name_english: "Switzerland", flag: "🇨🇭" },
    CountryOption { code: "ES", name_local: "스페인", name_english: "Spain", flag: "🇪🇸" },
    CountryOption { code: "SG", name_local: "싱가포르", name_english: "Singapore", flag: "🇸🇬" },
    CountryOption { code: "AR", name_local: "아르헨티나", name_english: "Argentina", flag: "🇦🇷" },
    CountryOption { code: "IE", name_local: "아일랜드", name_english: "Ireland", flag: "🇮🇪" },
    CountryOption { code: "GB", name_local: "영국", name_english: "United Kingdom", flag: "🇬🇧" },
    CountryOption { code: "AT", name_local: "오스트리아", name_english: "Austria", flag: "🇦🇹" },
    CountryOption { code: "UA", name_local: "우크라이나", name_english: "Ukraine", flag: "🇺🇦" },
    CountryOption { code: "IL", name_local: "이스라엘", name_english: "Israel", flag: "🇮🇱" },
    CountryOption { code: "EG", name_local: "이집트", name_english: "Egypt", flag: "🇪🇬" },
    CountryOption { code: "IT", name_local: "이탈리아", name_english: "Italy", flag: "🇮🇹" },
    CountryOption { code: "IN", name_local: "인도", name_english: "India", flag: "🇮🇳" },
    CountryOption { code: "ID", name_local: "인도네시아", name_english: "Indonesia", flag: "🇮🇩" },
    CountryOption { code: "JP", name_local: "일본", name_english: "Japan", flag: "🇯🇵" },
    CountryOption { code: "CZ", name_local: "체코", name_english: "Czechia", flag: "🇨🇿" },
    CountryOption { code: "CL", name_local: "칠레", name_english: "Chile", flag: "🇨🇱" },
    CountryOption { code: "CA", name_local: "캐나다", name_english: "Canada", flag: "🇨🇦" },
    CountryOption { code: "KE", name_local: "케냐", name_english: "Kenya", flag: "🇰🇪" },
    CountryOption { code: "CO", name_local: "콜롬비아", name_english: "Colombia", flag: "🇨🇴" },
    CountryOption { code: "TH", name_local: "태국", name_english: "Thailand", flag: "🇹🇭" },
    CountryOption { code: "TR", name_local: "튀르키예", name_english: "Türkiye", flag: "🇹🇷" },
    CountryOption { code: "PE", name_local: "페루", name_english: "Peru", flag: "🇵🇪" },
    CountryOption { code: "PT", name_local: "포르투갈", name_english: "Portugal", flag: "🇵🇹" },
    CountryOption { code: "PL", name_local: "폴란드", name_english: "Poland", flag: "🇵🇱" },
    CountryOption { code: "FR", name_local: "프랑스", name_english: "France", flag: "🇫🇷" },
    CountryOption { code: "FI", name_local: "핀란드", name_english: "Finland", flag: "🇫🇮" },
    CountryOption { code: "PH", name_local: "필리핀", name_english: "Philippines", flag: "🇵🇭" },
    CountryOption { code: "HU", name_local: "헝가리", name_english: "Hungary", flag: "🇭🇺" },
    CountryOption { code: "AU", name_local: "호주", name_english: "Australia", flag: "🇦🇺" },
    CountryOption { code: "HK", name_local: "홍콩", name_english: "Hong Kong", flag: "🇭🇰" },
];

/// Look up a country by its ISO code (case-insensitive).
pub fn find(code: &str) -> Option<&'static CountryOption> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Index of `code` within [`COUNTRIES`], defaulting to the home entry.
pub fn position(code: &str) -> usize {
    COUNTRIES
        .iter()
        .position(|c| c.code.eq_ignore_ascii_case(code))
        .unwrap_or(0)
}

/// Local display name, falling back to the raw code for unknown entries.
pub fn name_local(code: &str) -> String {
    find(code).map_or_else(|| code.to_string(), |c| c.name_local.to_string())
}

pub fn flag(code: &str) -> &'static str {
    find(code).map_or("", |c| c.flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_country_is_pinned_first() {
        assert_eq!(COUNTRIES[0].code, HOME_COUNTRY);
        assert_eq!(COUNTRIES[1].code, "US");
    }

    #[test]
    fn codes_are_unique_iso_alpha2() {
        let mut seen = std::collections::HashSet::new();
        for c in COUNTRIES {
            assert_eq!(c.code.len(), 2, "bad code {}", c.code);
            assert!(c.code.chars().all(|ch| ch.is_ascii_uppercase()));
            assert!(seen.insert(c.code), "duplicate code {}", c.code);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find("jp").is_some());
        assert_eq!(name_local("JP"), "일본");
        assert_eq!(name_local("XX"), "XX");
        assert_eq!(position("XX"), 0);
    }
}
