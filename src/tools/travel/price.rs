use std::sync::Arc;

use serde_json::json;

use super::catalog::TravelDataProvider;
use crate::tools::{AgentTool, AgentToolParameters};

pub const GET_FLIGHT_PRICE: &str = "get_flight_price";
pub const GET_ACCOMMODATION_PRICE: &str = "get_accommodation_price";
pub const CALCULATE_TOTAL_BUDGET: &str = "calculate_total_budget";

pub const DEFAULT_DEPARTURE: &str = "서울";
pub const DEFAULT_PEOPLE: u64 = 2;
pub const CURRENCY: &str = "KRW";

// Per person, per day.
const MEALS_PER_DAY: u64 = 50_000;
const TRANSPORT_PER_DAY: u64 = 30_000;
const ACTIVITIES_PER_DAY: u64 = 100_000;
const MISC_PER_DAY: u64 = 50_000;

/// Rooms for more than two guests cost 30% more per night.
fn adjusted_nightly_rate(base: u64, people: u64) -> u64 {
    if people > 2 {
        base.saturating_mul(13) / 10
    } else {
        base
    }
}

pub fn get_flight_price(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    AgentTool::from_fn(
        GET_FLIGHT_PRICE,
        "출발지에서 여행지까지의 왕복 항공권 가격(1인 및 총액, KRW)을 조회합니다.",
        AgentToolParameters::object()
            .string("destination", "도착 여행지", true)
            .string("departure", "출발지 (기본값: 서울)", false)
            .integer("people", "인원 수 (기본값: 2)", (Some(1), None), false)
            .build(),
        move |args| {
            let destination = args.get_str("destination")?;
            let departure = args.get_str_opt("departure").unwrap_or(DEFAULT_DEPARTURE);
            let people = args.get_u64_or("people", DEFAULT_PEOPLE)?;
            let per_person = data.flight_price_per_person(destination);
            Ok(json!({
                "destination": destination,
                "departure": departure,
                "pricePerPerson": per_person,
                "totalPrice": per_person.saturating_mul(people),
                "people": people,
                "currency": CURRENCY,
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "destination": { "type": "string" },
            "departure": { "type": "string" },
            "pricePerPerson": { "type": "integer" },
            "totalPrice": { "type": "integer" },
            "people": { "type": "integer" },
            "currency": { "type": "string" }
        },
        "required": ["destination", "departure", "pricePerPerson", "totalPrice", "people", "currency"]
    }))
}

pub fn get_accommodation_price(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    AgentTool::from_fn(
        GET_ACCOMMODATION_PRICE,
        "여행지의 1박 숙박 요금과 전체 숙박 비용(KRW)을 조회합니다.",
        AgentToolParameters::object()
            .string("destination", "여행지", true)
            .integer("nights", "숙박 일수", (Some(0), None), true)
            .integer("people", "인원 수 (기본값: 2)", (Some(1), None), false)
            .build(),
        move |args| {
            let destination = args.get_str("destination")?;
            let nights = args.get_u64("nights")?;
            let people = args.get_u64_or("people", DEFAULT_PEOPLE)?;
            let per_night = adjusted_nightly_rate(data.nightly_rate(destination), people);
            Ok(json!({
                "destination": destination,
                "pricePerNight": per_night,
                "nights": nights,
                "totalPrice": per_night.saturating_mul(nights),
                "people": people,
                "currency": CURRENCY,
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "destination": { "type": "string" },
            "pricePerNight": { "type": "integer" },
            "nights": { "type": "integer" },
            "totalPrice": { "type": "integer" },
            "people": { "type": "integer" },
            "currency": { "type": "string" }
        },
        "required": ["destination", "pricePerNight", "nights", "totalPrice", "people", "currency"]
    }))
}

pub fn calculate_total_budget() -> AgentTool {
    AgentTool::from_fn(
        CALCULATE_TOTAL_BUDGET,
        "항공권과 숙박 비용에 식비, 교통비, 액티비티, 기타 경비를 더해 총 예산과 1인당 비용을 계산합니다.",
        AgentToolParameters::object()
            .integer("flight_cost", "항공권 총액", (Some(0), None), true)
            .integer("accommodation_cost", "숙박 총액", (Some(0), None), true)
            .integer("days", "여행 일수", (Some(0), None), true)
            .integer("people", "인원 수", (Some(1), None), true)
            .build(),
        |args| {
            let flight = args.get_u64("flight_cost")?;
            let accommodation = args.get_u64("accommodation_cost")?;
            let days = args.get_u64("days")?;
            let people = args.get_u64("people")?.max(1);

            let daily = |rate: u64| rate.saturating_mul(days).saturating_mul(people);
            let meals = daily(MEALS_PER_DAY);
            let transport = daily(TRANSPORT_PER_DAY);
            let activities = daily(ACTIVITIES_PER_DAY);
            let misc = daily(MISC_PER_DAY);
            let total = [flight, accommodation, meals, transport, activities, misc]
                .into_iter()
                .fold(0u64, u64::saturating_add);

            Ok(json!({
                "total": total,
                "perPerson": total / people,
                "breakdown": {
                    "flight": flight,
                    "accommodation": accommodation,
                    "meals": meals,
                    "transport": transport,
                    "activities": activities,
                    "miscellaneous": misc,
                },
                "currency": CURRENCY,
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "total": { "type": "integer" },
            "perPerson": { "type": "integer" },
            "breakdown": {
                "type": "object",
                "properties": {
                    "flight": { "type": "integer" },
                    "accommodation": { "type": "integer" },
                    "meals": { "type": "integer" },
                    "transport": { "type": "integer" },
                    "activities": { "type": "integer" },
                    "miscellaneous": { "type": "integer" }
                },
                "required": ["flight", "accommodation", "meals", "transport", "activities", "miscellaneous"]
            },
            "currency": { "type": "string" }
        },
        "required": ["total", "perPerson", "breakdown", "currency"]
    }))
}
