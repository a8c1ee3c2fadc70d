//! Lookup data behind the travel tools.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::TravelStyle;

/// A destination as listed by style search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSummary {
    pub name: String,
    pub country: String,
    pub avg_cost: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Season {
    #[strum(serialize = "여름")]
    Summer,
    #[strum(serialize = "겨울")]
    Winter,
}

impl Season {
    /// June through September count as summer.
    pub fn for_month(month: u32) -> Self {
        if (6..=9).contains(&month) {
            Season::Summer
        } else {
            Season::Winter
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rainfall {
    #[strum(serialize = "낮음")]
    Low,
    #[strum(serialize = "보통")]
    Moderate,
    #[strum(serialize = "높음")]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonalWeather {
    pub avg_temperature: i32,
    pub rainfall: Rainfall,
    pub description: String,
}

/// Source of destination, price, weather and event data for the travel tools.
///
/// The tools depend only on this trait, so a live pricing or weather backend
/// can replace [`CatalogData`] without touching them.
pub trait TravelDataProvider: Send + Sync {
    fn destinations(&self, style: TravelStyle) -> Vec<DestinationSummary>;
    /// Case-insensitive lookup across every style.
    fn find_destination(&self, name: &str) -> Option<(TravelStyle, DestinationSummary)>;
    fn highlights(&self, name: &str) -> Vec<String>;
    fn best_season(&self, name: &str) -> String;
    fn flight_price_per_person(&self, destination: &str) -> u64;
    fn nightly_rate(&self, destination: &str) -> u64;
    fn weather(&self, destination: &str, season: Season) -> SeasonalWeather;
    fn events(&self, destination: &str, month: u32) -> Vec<String>;
}

const DESTINATIONS: &[(TravelStyle, &str, &str, u64)] = &[
    (TravelStyle::Beach, "다낭", "베트남", 1_500_000),
    (TravelStyle::Beach, "발리", "인도네시아", 1_800_000),
    (TravelStyle::Beach, "푸켓", "태국", 1_600_000),
    (TravelStyle::Beach, "세부", "필리핀", 1_400_000),
    (TravelStyle::Beach, "오키나와", "일본", 2_200_000),
    (TravelStyle::Culture, "교토", "일본", 2_000_000),
    (TravelStyle::Culture, "로마", "이탈리아", 3_500_000),
    (TravelStyle::Culture, "방콕", "태국", 1_300_000),
    (TravelStyle::Culture, "프라하", "체코", 2_800_000),
    (TravelStyle::Culture, "이스탄불", "터키", 2_200_000),
    (TravelStyle::Adventure, "퀸즈타운", "뉴질랜드", 4_000_000),
    (TravelStyle::Adventure, "인터라켄", "스위스", 4_500_000),
    (TravelStyle::Adventure, "치앙마이", "태국", 1_500_000),
    (TravelStyle::Adventure, "코타키나발루", "말레이시아", 1_700_000),
    (TravelStyle::City, "도쿄", "일본", 2_500_000),
    (TravelStyle::City, "싱가포르", "싱가포르", 2_300_000),
    (TravelStyle::City, "홍콩", "중국", 2_000_000),
    (TravelStyle::City, "파리", "프랑스", 3_800_000),
    (TravelStyle::City, "뉴욕", "미국", 5_000_000),
    (TravelStyle::Nature, "제주도", "한국", 800_000),
    (TravelStyle::Nature, "하롱베이", "베트남", 1_400_000),
    (TravelStyle::Nature, "반프", "캐나다", 4_200_000),
    (TravelStyle::Nature, "크라비", "태국", 1_600_000),
];

const HIGHLIGHTS: &[(&str, [&str; 3])] = &[
    ("다낭", ["바나힐", "미케비치", "호이안"]),
    ("발리", ["우붓", "탄롯사원", "테갈랄랑 라이스테라스"]),
    ("교토", ["금각사", "후시미이나리", "기요미즈데라"]),
    ("제주도", ["한라산", "성산일출봉", "우도"]),
];
const DEFAULT_HIGHLIGHTS: [&str; 3] = ["명소1", "명소2", "명소3"];

const BEST_SEASONS: &[(&str, &str)] = &[
    ("다낭", "3월-8월"),
    ("발리", "4월-10월"),
    ("교토", "3월-5월, 10월-11월"),
    ("제주도", "4월-6월, 9월-11월"),
];
const DEFAULT_BEST_SEASON: &str = "연중";

const FLIGHT_PRICES: &[(&str, u64)] = &[
    ("다낭", 350_000),
    ("발리", 450_000),
    ("교토", 400_000),
    ("제주도", 150_000),
    ("파리", 1_200_000),
    ("뉴욕", 1_500_000),
];
const DEFAULT_FLIGHT_PRICE: u64 = 500_000;

const NIGHTLY_RATES: &[(&str, u64)] = &[
    ("다낭", 100_000),
    ("발리", 120_000),
    ("교토", 150_000),
    ("제주도", 80_000),
    ("파리", 200_000),
    ("뉴욕", 250_000),
];
const DEFAULT_NIGHTLY_RATE: u64 = 100_000;

type WeatherRow = (i32, Rainfall, &'static str);

const WEATHER: &[(&str, WeatherRow, WeatherRow)] = &[
    (
        "다낭",
        (30, Rainfall::High, "맑고 더움, 우기 시작"),
        (24, Rainfall::Low, "쾌적하고 건조"),
    ),
    (
        "발리",
        (28, Rainfall::High, "습하고 더움"),
        (26, Rainfall::Low, "건기, 여행 최적기"),
    ),
    (
        "교토",
        (28, Rainfall::Moderate, "무덥고 습함"),
        (5, Rainfall::Low, "춥고 건조"),
    ),
    (
        "제주도",
        (26, Rainfall::High, "따뜻하고 습함"),
        (8, Rainfall::Moderate, "쌀쌀하고 바람"),
    ),
];
const DEFAULT_SUMMER: WeatherRow = (25, Rainfall::Moderate, "일반적인 여름 날씨");
const DEFAULT_WINTER: WeatherRow = (15, Rainfall::Moderate, "일반적인 겨울 날씨");

const EVENTS: &[(&str, u32, &str)] = &[
    ("다낭", 8, "다낭 국제 불꽃축제"),
    ("다낭", 12, "크리스마스 마켓"),
    ("발리", 3, "발리 뉴이어 (Nyepi)"),
    ("발리", 6, "발리 아트 페스티벌"),
    ("교토", 4, "벚꽃 축제"),
    ("교토", 11, "단풍 축제"),
    ("제주도", 4, "유채꽃 축제"),
    ("제주도", 10, "제주 억새 축제"),
];

fn lookup<'a, T: Copy>(table: &'a [(&'a str, T)], name: &str) -> Option<T> {
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|(_, value)| *value)
}

fn summary(row: &(TravelStyle, &str, &str, u64)) -> DestinationSummary {
    DestinationSummary {
        name: row.1.to_string(),
        country: row.2.to_string(),
        avg_cost: row.3,
    }
}

/// Built-in static tables (KRW prices, Seoul departures).
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogData;

impl TravelDataProvider for CatalogData {
    fn destinations(&self, style: TravelStyle) -> Vec<DestinationSummary> {
        DESTINATIONS
            .iter()
            .filter(|row| row.0 == style)
            .map(summary)
            .collect()
    }

    fn find_destination(&self, name: &str) -> Option<(TravelStyle, DestinationSummary)> {
        DESTINATIONS
            .iter()
            .find(|row| row.1.eq_ignore_ascii_case(name.trim()))
            .map(|row| (row.0, summary(row)))
    }

    fn highlights(&self, name: &str) -> Vec<String> {
        lookup(HIGHLIGHTS, name)
            .unwrap_or(DEFAULT_HIGHLIGHTS)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn best_season(&self, name: &str) -> String {
        lookup(BEST_SEASONS, name)
            .unwrap_or(DEFAULT_BEST_SEASON)
            .to_string()
    }

    fn flight_price_per_person(&self, destination: &str) -> u64 {
        lookup(FLIGHT_PRICES, destination).unwrap_or(DEFAULT_FLIGHT_PRICE)
    }

    fn nightly_rate(&self, destination: &str) -> u64 {
        lookup(NIGHTLY_RATES, destination).unwrap_or(DEFAULT_NIGHTLY_RATE)
    }

    fn weather(&self, destination: &str, season: Season) -> SeasonalWeather {
        let (summer, winter) = WEATHER
            .iter()
            .find(|(key, _, _)| key.eq_ignore_ascii_case(destination.trim()))
            .map(|(_, summer, winter)| (*summer, *winter))
            .unwrap_or((DEFAULT_SUMMER, DEFAULT_WINTER));
        let (avg_temperature, rainfall, description) = match season {
            Season::Summer => summer,
            Season::Winter => winter,
        };
        SeasonalWeather {
            avg_temperature,
            rainfall,
            description: description.to_string(),
        }
    }

    fn events(&self, destination: &str, month: u32) -> Vec<String> {
        EVENTS
            .iter()
            .filter(|(key, m, _)| *m == month && key.eq_ignore_ascii_case(destination.trim()))
            .map(|(_, _, event)| event.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_style_has_destinations() {
        use strum::IntoEnumIterator;
        for style in TravelStyle::iter() {
            assert!(!CatalogData.destinations(style).is_empty(), "{style} is empty");
        }
        assert_eq!(CatalogData.destinations(TravelStyle::Beach).len(), 5);
    }

    #[test]
    fn find_destination_reports_style() {
        let (style, summary) = CatalogData.find_destination(" 제주도 ").unwrap();
        assert_eq!(style, TravelStyle::Nature);
        assert_eq!(summary.avg_cost, 800_000);
        assert!(CatalogData.find_destination("아틀란티스").is_none());
    }

    #[test]
    fn unknown_destinations_fall_back_to_defaults() {
        assert_eq!(CatalogData.flight_price_per_person("로마"), DEFAULT_FLIGHT_PRICE);
        assert_eq!(CatalogData.nightly_rate("로마"), DEFAULT_NIGHTLY_RATE);
        assert_eq!(CatalogData.best_season("로마"), "연중");
        assert_eq!(CatalogData.highlights("로마").len(), 3);
        assert_eq!(CatalogData.weather("로마", Season::Winter).avg_temperature, 15);
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::for_month(5), Season::Winter);
        assert_eq!(Season::for_month(6), Season::Summer);
        assert_eq!(Season::for_month(9), Season::Summer);
        assert_eq!(Season::for_month(10), Season::Winter);
    }

    #[test]
    fn events_match_month() {
        assert_eq!(CatalogData.events("다낭", 8), vec!["다낭 국제 불꽃축제".to_string()]);
        assert!(CatalogData.events("다낭", 7).is_empty());
    }
}
