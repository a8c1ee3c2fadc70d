//! System and user prompts for the recommendation run.

use crate::types::{Budget, TravelPreferences};

use super::MAX_RECOMMENDATIONS;

pub const SYSTEM_PROMPT: &str = "\
당신은 전문 여행 컨설턴트 AI입니다.

**역할:**
사용자의 선호도를 바탕으로 최적의 여행지를 추천하고, 구체적인 비용 내역과 여행 팁을 제공합니다.

**추천 프로세스:**
1. 사용자의 여행 스타일에 맞는 여행지 검색 (search_destinations)
2. 필요하면 여행지 상세 정보 조회 (get_destination_details)
3. 각 여행지의 항공료 조회 (get_flight_price)
4. 숙박비 조회 (get_accommodation_price)
5. 총 예산 계산 (calculate_total_budget)
6. 사용자 예산과 비교하여 적합한 여행지 필터링
7. 날씨 정보 확인 (get_weather_forecast)
8. 시즌 이벤트 확인 (check_seasonal_events)
9. 적합도 순으로 여행지 선정 및 추천

**중요:**
- 반드시 사용자 예산 내에서 추천
- 가격과 날씨는 추측하지 말고 Tool 결과를 사용
- 추천 이유는 구체적이고 설득력 있게 작성
- 최종 답변은 JSON만 출력하고 다른 설명은 붙이지 않음";

/// Render the user message for one request.
pub fn user_prompt(prefs: &TravelPreferences) -> String {
    let days = prefs.days();
    let companion = prefs
        .companion
        .map(|companion| format!("- 동행: {companion}\n"))
        .unwrap_or_default();
    let request = prefs
        .custom_request
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|request| format!("- 추가 요청: {request}\n"))
        .unwrap_or_default();

    let mut prompt = String::from("다음 조건에 맞는 여행지를 추천해주세요:\n\n**여행 정보:**\n");
    prompt.push_str(&format!(
        "- 여행 기간: {} ~ {} ({days}일, {days}박)\n",
        prefs.start_date, prefs.end_date
    ));
    prompt.push_str(&format!("- 출발 월: {}월\n", prefs.month()));
    prompt.push_str(&format!("- 1인 예산: {}\n", budget_label(&prefs.budget)));
    prompt.push_str(&format!("- 인원: {}명\n", prefs.number_of_people));
    prompt.push_str(&companion);
    prompt.push_str(&format!("- 여행 스타일: {}\n", prefs.travel_style));
    prompt.push_str(&request);
    prompt.push_str(&format!(
        "\n**출력 형식:**\n\
         다음 형태의 JSON 객체 하나만 반환하세요. \
         최대 {MAX_RECOMMENDATIONS}곳, 가장 적합한 여행지부터 나열합니다.\n"
    ));
    prompt.push_str(OUTPUT_EXAMPLE);
    prompt
}

const OUTPUT_EXAMPLE: &str = r#"{"destinations": [{"name": "다낭", "country": "베트남", "estimatedCost": 1800000, "flightCost": 350000, "accommodationCost": 300000, "highlights": ["바나힐", "미케비치"], "reason": "...", "bestSeason": "3월-8월", "weather": "평균 30°C, 맑음", "tips": ["선크림 필수"]}]}
- estimatedCost, flightCost, accommodationCost: 1인 기준 원화 정수
- weather: 모르면 null
- tips: 없으면 빈 배열
"#;

fn budget_label(budget: &Budget) -> String {
    match budget {
        Budget::Fixed(amount) => format!("₩{}", group_thousands(*amount)),
        Budget::Undecided => "미정 (예산 제한 없음)".to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Companion, TravelStyle};
    use chrono::NaiveDate;

    fn prefs(budget: Budget) -> TravelPreferences {
        TravelPreferences {
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 7).unwrap(),
            budget,
            number_of_people: 2,
            companion: Some(Companion::Partner),
            travel_style: TravelStyle::Beach,
            custom_request: Some("  조용한 곳  ".into()),
        }
    }

    #[test]
    fn includes_derived_trip_facts() {
        let prompt = user_prompt(&prefs(Budget::Fixed(2_000_000)));
        assert!(prompt.contains("(6일, 6박)"));
        assert!(prompt.contains("출발 월: 8월"));
        assert!(prompt.contains("₩2,000,000"));
        assert!(prompt.contains("동행: partner"));
        assert!(prompt.contains("여행 스타일: beach"));
        assert!(prompt.contains("추가 요청: 조용한 곳\n"));
        assert!(prompt.contains("JSON"));
    }

    #[test]
    fn optional_lines_are_left_out_when_absent() {
        let mut bare = prefs(Budget::Fixed(2_000_000));
        bare.companion = None;
        bare.custom_request = Some("   ".into());

        let prompt = user_prompt(&bare);
        assert!(!prompt.contains("동행"));
        assert!(!prompt.contains("추가 요청"));
        assert!(prompt.contains("- 인원: 2명\n- 여행 스타일: beach\n\n**출력 형식:**\n"));
        assert!(prompt.contains("최대 5곳"));
        assert!(prompt.ends_with("- tips: 없으면 빈 배열\n"));
    }

    #[test]
    fn undecided_budget_is_spelled_out() {
        assert!(user_prompt(&prefs(Budget::Undecided)).contains("미정"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }
}
