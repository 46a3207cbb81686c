use serde::{Deserialize, Serialize};

/// The closed risk vocabulary. Every risk the report may mention is one of
/// these five; the aggregator's response schema enumerates exactly these
/// identifiers, so an out-of-vocabulary risk fails at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Bear,
    AltitudeSickness,
    HighWind,
    Hypothermia,
    Fall,
}

impl Risk {
    pub const ALL: [Risk; 5] = [
        Risk::Bear,
        Risk::AltitudeSickness,
        Risk::HighWind,
        Risk::Hypothermia,
        Risk::Fall,
    ];

    pub fn emoji(self) -> &'static str {
        match self {
            Risk::Bear => "🐻",
            Risk::AltitudeSickness => "🧠",
            Risk::HighWind => "🌬️",
            Risk::Hypothermia => "🥶",
            Risk::Fall => "🤕",
        }
    }

    pub fn label_ja(self) -> &'static str {
        match self {
            Risk::Bear => "熊",
            Risk::AltitudeSickness => "高山病",
            Risk::HighWind => "強風",
            Risk::Hypothermia => "低体温症",
            Risk::Fall => "滑落",
        }
    }

    /// The schema identifier, as serialized over the wire.
    pub fn identifier(self) -> &'static str {
        match self {
            Risk::Bear => "bear",
            Risk::AltitudeSickness => "altitude_sickness",
            Risk::HighWind => "high_wind",
            Risk::Hypothermia => "hypothermia",
            Risk::Fall => "fall",
        }
    }
}

/// Forecast items for one hiking date. Values are kept as the model phrased
/// them (e.g. "12°C", "30%") — the report is prose, not telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub date: String,
    pub high_temp: String,
    pub low_temp: String,
    pub precipitation_chance: String,
    pub wind_speed: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailInfo {
    pub name: String,
    pub difficulty: String,
    pub ascent_time: String,
    pub descent_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk: Risk,
    /// Why this risk is relevant to this hike.
    pub relevance: String,
    /// How to mitigate it during the hike.
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkItem {
    pub title: String,
    pub url: String,
}

/// The structured hiking report the aggregator produces. Only risks judged
/// relevant appear in `risk_emojis` and `risk_analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HikingReport {
    pub summary: String,
    pub risk_emojis: Vec<Risk>,
    pub weather: Vec<WeatherDay>,
    pub news: Vec<String>,
    pub trails: Vec<TrailInfo>,
    pub risk_analysis: Vec<RiskAssessment>,
    pub links: Vec<LinkItem>,
}

/// Services recommended in every report, appended after the researched
/// links. Data here rather than prompt text so the block cannot drift.
pub const SERVICE_LINKS: [(&str, &str); 3] = [
    ("YamaReco", "https://www.yamareco.com/"),
    ("Yamap", "https://yamap.com/"),
    ("Cocoheli", "https://www.cocoheli.com/"),
];

impl HikingReport {
    /// Gemini response schema for the structured report. The risk fields
    /// enumerate the closed vocabulary.
    pub fn response_schema() -> serde_json::Value {
        let risk_values: Vec<&str> = Risk::ALL.iter().map(|r| r.identifier()).collect();
        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "summary": {
                    "type": "STRING",
                    "description": "Brief description of the mountain and hiking dates, in Japanese."
                },
                "risk_emojis": {
                    "type": "ARRAY",
                    "items": { "type": "STRING", "enum": risk_values },
                    "description": "Only the risks relevant to this hike."
                },
                "weather": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "date": { "type": "STRING" },
                            "high_temp": { "type": "STRING" },
                            "low_temp": { "type": "STRING" },
                            "precipitation_chance": { "type": "STRING" },
                            "wind_speed": { "type": "STRING" }
                        },
                        "required": ["date", "high_temp", "low_temp", "precipitation_chance", "wind_speed"]
                    }
                },
                "news": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                },
                "trails": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "difficulty": { "type": "STRING" },
                            "ascent_time": { "type": "STRING" },
                            "descent_time": { "type": "STRING" }
                        },
                        "required": ["name", "difficulty", "ascent_time", "descent_time"]
                    }
                },
                "risk_analysis": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "risk": { "type": "STRING", "enum": risk_values },
                            "relevance": { "type": "STRING" },
                            "mitigation": { "type": "STRING" }
                        },
                        "required": ["risk", "relevance", "mitigation"]
                    }
                },
                "links": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING" },
                            "url": { "type": "STRING" }
                        },
                        "required": ["title", "url"]
                    }
                }
            },
            "required": ["summary", "risk_emojis", "weather", "news", "trails", "risk_analysis", "links"]
        })
    }

    /// Render the six-section Japanese report outline from the structured
    /// record. Section headings and the fixed service-link block come from
    /// here, not from the model.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# ハイキングレポート\n\n");

        out.push_str("## 1. 概要\n");
        out.push_str(&self.summary);
        out.push_str("\n\n");
        if !self.risk_emojis.is_empty() {
            let emojis: Vec<&str> = self.risk_emojis.iter().map(|r| r.emoji()).collect();
            out.push_str(&format!("**リスク：{}**\n\n", emojis.join(" ")));
        }

        out.push_str("## 2. 天気予報\n");
        for day in &self.weather {
            out.push_str(&format!("### {}\n", day.date));
            out.push_str(&format!("- 最高気温: {}\n", day.high_temp));
            out.push_str(&format!("- 最低気温: {}\n", day.low_temp));
            out.push_str(&format!("- 降水確率: {}\n", day.precipitation_chance));
            out.push_str(&format!("- 風速: {}\n", day.wind_speed));
        }
        out.push('\n');

        out.push_str("## 3. 関連ニュース\n");
        for item in &self.news {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');

        out.push_str("## 4. 登山道情報\n");
        for trail in &self.trails {
            out.push_str(&format!(
                "- **{}**（難易度: {}）登り: {} / 下り: {}\n",
                trail.name, trail.difficulty, trail.ascent_time, trail.descent_time
            ));
        }
        out.push('\n');

        out.push_str("## 5. リスク分析\n");
        for item in &self.risk_analysis {
            out.push_str(&format!("### {} {}\n", item.risk.label_ja(), item.risk.emoji()));
            out.push_str(&item.relevance);
            out.push('\n');
            out.push_str(&format!("対策: {}\n\n", item.mitigation));
        }

        out.push_str("## 6. リンク\n");
        for link in &self.links {
            out.push_str(&format!("- [{}]({})\n", link.title, link.url));
        }
        out.push_str("\n**役に立つサービス:**\n");
        for (title, url) in SERVICE_LINKS {
            out.push_str(&format!("- [{}]({})\n", title, url));
        }

        out
    }
}
