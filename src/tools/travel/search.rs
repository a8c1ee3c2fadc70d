use std::sync::Arc;

use serde_json::json;
use strum::IntoEnumIterator;

use super::catalog::TravelDataProvider;
use crate::error::RoamError;
use crate::tools::{AgentTool, AgentToolParameters};
use crate::types::TravelStyle;

pub const SEARCH_DESTINATIONS: &str = "search_destinations";
pub const GET_DESTINATION_DETAILS: &str = "get_destination_details";

pub fn search_destinations(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    let styles: Vec<String> = TravelStyle::iter().map(|s| s.to_string()).collect();
    let style_refs: Vec<&str> = styles.iter().map(String::as_str).collect();

    AgentTool::from_fn(
        SEARCH_DESTINATIONS,
        "여행 스타일에 맞는 여행지 목록을 검색합니다. 각 항목은 이름, 국가, 1인 평균 비용(KRW)을 포함합니다.",
        AgentToolParameters::object()
            .string_enum("travel_style", "여행 스타일", &style_refs, true)
            .build(),
        move |args| {
            let raw = args.get_str("travel_style")?;
            let style: TravelStyle = raw
                .parse()
                .map_err(|_| RoamError::InvalidArgument(format!("unknown travel style '{raw}'")))?;
            Ok(serde_json::to_value(data.destinations(style))?)
        },
    )
    .with_output_schema(json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "country": { "type": "string" },
                "avgCost": { "type": "integer" }
            },
            "required": ["name", "country", "avgCost"]
        }
    }))
}

pub fn get_destination_details(data: Arc<dyn TravelDataProvider>) -> AgentTool {
    AgentTool::from_fn(
        GET_DESTINATION_DETAILS,
        "특정 여행지의 국가, 평균 비용, 여행 스타일, 주요 명소, 최적 여행 시기를 조회합니다.",
        AgentToolParameters::object()
            .string("destination_name", "여행지 이름 (예: 다낭)", true)
            .build(),
        move |args| {
            let name = args.get_str("destination_name")?;
            let (style, summary) = data.find_destination(name).ok_or_else(|| {
                RoamError::tool(
                    GET_DESTINATION_DETAILS,
                    format!("'{name}' 여행지를 찾을 수 없습니다."),
                )
            })?;
            Ok(json!({
                "name": summary.name,
                "country": summary.country,
                "avgCost": summary.avg_cost,
                "style": style.to_string(),
                "highlights": data.highlights(&summary.name),
                "bestSeason": data.best_season(&summary.name),
            }))
        },
    )
    .with_output_schema(json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "country": { "type": "string" },
            "avgCost": { "type": "integer" },
            "style": { "type": "string" },
            "highlights": { "type": "array", "items": { "type": "string" } },
            "bestSeason": { "type": "string" }
        },
        "required": ["name", "country", "avgCost", "style", "highlights", "bestSeason"]
    }))
}
