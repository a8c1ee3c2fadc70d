use std::sync::Arc;

use serde_json::json;

use super::catalog::{Rainfall, Season, SeasonalWeather, TravelDataProvider};
use crate::tools::{AgentTool, AgentToolParameters};

pub const GET_WEATHER_FORECAST: &str = "get_weather_forecast";
pub const CHECK_SEASONAL_EVENTS: &str = "check_seasonal_events";

const NO_EVENTS: &str = "특별 이벤트 없음";

fn packing_advice(weather: &SeasonalWeather) -> String {
    let mut advice = Vec::new();
    if weather.avg_temperature > 28 {
        advice.push("선크림과 모자 필수");
    } else if weather.avg_temperature < 10 {
        advice.push("따뜻한 옷 준비");
    }
    if weather.rainfall == Rainfall::High {
        advice.push("우산 또는 우비 준비");
        advice.push("실내 활동 계획 추천");
    }
    if advice.is_empty() {
        "쾌적한 여행 날씨".to_string()
    } else {
        advice.join(", ")
    }
}

fn month_parameters() -> AgentToolParameters {
    AgentToolParameters::object()
        .string("destination", "여행지", true)
        .integer("month", "여행 월 (1-12)", (Some(1), Some(12)), true)
        .build()
}

pub fn get_weather_forecast(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    AgentTool::from_fn(
        GET_WEATHER_FORECAST,
        "여행지의 해당 월 평균 기온, 강수량, 날씨 설명과 준비물 추천을 조회합니다.",
        month_parameters(),
        move |args| {
            let destination = args.get_str("destination")?;
            let month = args.get_u64("month")? as u32;
            let season = Season::for_month(month);
            let weather = data.weather(destination, season);
            Ok(json!({
                "destination": destination,
                "month": month,
                "season": season.to_string(),
                "avgTemperature": weather.avg_temperature,
                "rainfall": weather.rainfall.to_string(),
                "description": weather.description,
                "recommendation": packing_advice(&weather),
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "destination": { "type": "string" },
            "month": { "type": "integer" },
            "season": { "type": "string" },
            "avgTemperature": { "type": "integer" },
            "rainfall": { "type": "string" },
            "description": { "type": "string" },
            "recommendation": { "type": "string" }
        },
        "required": [
            "destination",
            "month",
            "season",
            "avgTemperature",
            "rainfall",
            "description",
            "recommendation"
        ]
    }))
}

pub fn check_seasonal_events(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    AgentTool::from_fn(
        CHECK_SEASONAL_EVENTS,
        "여행지에서 해당 월에 열리는 축제와 특별 이벤트를 확인합니다.",
        month_parameters(),
        move |args| {
            let destination = args.get_str("destination")?;
            let month = args.get_u64("month")? as u32;
            let events = data.events(destination, month);
            let has_events = !events.is_empty();
            let events = if has_events {
                events
            } else {
                vec![NO_EVENTS.to_string()]
            };
            Ok(json!({
                "destination": destination,
                "month": month,
                "events": events,
                "hasEvents": has_events,
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "destination": { "type": "string" },
            "month": { "type": "integer" },
            "events": { "type": "array", "items": { "type": "string" } },
            "hasEvents": { "type": "boolean" }
        },
        "required": ["destination", "month", "events", "hasEvents"]
    }))
}
