//! Instruction builders for the SafeHike agents.
//!
//! Each builder is a plain function over the typed session record, so a
//! prompt can only reference fields that exist. Missing facts render as an
//! explicit marker instead of failing: the planner's instruction keeps it
//! from delegating before the facts are recorded, and the pipeline does not
//! re-validate.

use safehike_core::HikeState;

const TEAM_PREAMBLE: &str = "You are part of a hiking guide team. Your team is in charge of \
     providing safe hiking advice.";

fn mountain(state: &HikeState) -> &str {
    state.mountain.as_deref().unwrap_or("(not provided)")
}

fn hiking_dates(state: &HikeState) -> String {
    if state.hiking_dates.is_empty() {
        "(not provided)".to_string()
    } else {
        state.hiking_dates.join(", ")
    }
}

fn current_date(state: &HikeState) -> &str {
    state.current_date.as_deref().unwrap_or("(unknown)")
}

pub fn weather_instruction(state: &HikeState) -> String {
    format!(
        "{preamble}\n\
         The user is planning to hike according to the following details:\n\
         Mountain: {mountain}\n\
         Hiking Dates: {dates}\n\
         Your role is to provide weather forecasts for the target mountain and the dates of \
         the hike.\n\
         Use web search to look up the weather forecast for that mountain on those dates.\n\
         Prefer information from https://weathernews.jp/mountain/ when obtaining weather data, \
         and give the user a link to the relevant weather page.\n\
         Be brief and concise in your responses.\n\
         The current date is {today}.",
        preamble = TEAM_PREAMBLE,
        mountain = mountain(state),
        dates = hiking_dates(state),
        today = current_date(state),
    )
}

pub fn news_instruction(state: &HikeState) -> String {
    format!(
        "{preamble}\n\
         The user is planning to hike according to the following details:\n\
         Mountain: {mountain}\n\
         Hiking Dates: {dates}\n\
         Your role is to provide recent news about the target mountain that may affect hiking \
         safety.\n\
         News should include the following topics: recent accidents, trail closures, wildlife \
         activity, and any other relevant information.\n\
         Use web search to look for news that may be relevant to that mountain and the dates \
         of the hike.\n\
         Be brief and concise in your responses.\n\
         The current date is {today}.",
        preamble = TEAM_PREAMBLE,
        mountain = mountain(state),
        dates = hiking_dates(state),
        today = current_date(state),
    )
}

pub fn links_instruction(state: &HikeState) -> String {
    format!(
        "{preamble}\n\
         The user is planning to hike according to the following details:\n\
         Mountain: {mountain}\n\
         Hiking Dates: {dates}\n\
         Your role is to find the links to websites that are important for the hike.\n\
         This includes links to official mountain websites, trail information pages, emergency \
         information and any other relevant resources.\n\
         Search for the mountain in yamap.com and add the link to your list.\n\
         Your output should be a list of URLs and their titles in markdown format.\n\
         The current date is {today}.",
        preamble = TEAM_PREAMBLE,
        mountain = mountain(state),
        dates = hiking_dates(state),
        today = current_date(state),
    )
}

pub fn trail_instruction(state: &HikeState) -> String {
    let trail_task = match state.trail.as_deref() {
        Some(trail) => format!(
            "The user wants to hike the following trail: {trail}\n\
             Provide detailed information about that specific trail: its difficulty level, \
             estimated hiking time (ascent, descent, rest), and a list of safety considerations, \
             taking into account the weather and news information already collected."
        ),
        None => "The user has not specified any trail preference.\n\
             Provide a brief overview of the different mountain trails that are relevant to \
             their hike: a list of the trails, along with their difficulty level, estimated \
             hiking time, and a list of safety considerations for each trail.\n\
             The hiking time information must be disaggregated into ascent time and descent \
             time, as well as rest time."
            .to_string(),
    };

    format!(
        "{preamble}\n\
         The user is planning to hike according to the following details:\n\
         Mountain: {mountain}\n\
         Hiking Dates: {dates}\n\
         We have collected the following information relevant to the hike:\n\
         **Weather:** {weather}\n\
         **News:** {news}\n\
         Your role is to provide the user with information about the trails on the target \
         mountain.\n\
         Many mountains can be hiked from different trails. Trails may have different \
         difficulty levels, conditions, and safety considerations. Some trails may be \
         unavailable due to weather conditions, events, or maintenance.\n\
         {trail_task}\n\
         In all cases, use web search to look up information about the trails on the target \
         mountain.\n\
         The current date is {today}.",
        preamble = TEAM_PREAMBLE,
        mountain = mountain(state),
        dates = hiking_dates(state),
        weather = state.weather_report.as_deref().unwrap_or("(not yet collected)"),
        news = state.news_report.as_deref().unwrap_or("(not yet collected)"),
        trail_task = trail_task,
        today = current_date(state),
    )
}

pub fn aggregator_instruction(state: &HikeState) -> String {
    format!(
        "{preamble}\n\
         Your role is to generate the final hiking report from the information collected by \
         your teammates:\n\n\
         **Mountain:**\n{mountain}\n\n\
         **Hiking Dates:**\n{dates}\n\n\
         **Weather Report:**\n{weather}\n\n\
         **Trail Report:**\n{trail}\n\n\
         **News Report:**\n{news}\n\n\
         **Important Links:**\n{links}\n\n\
         Fill every field of the requested output structure:\n\
         - summary: a brief description of the mountain and the hiking dates.\n\
         - risk_emojis: the risks relevant to this hike. There are exactly five risks you may \
         consider: bear, altitude_sickness, high_wind, hypothermia, fall. Include only the \
         relevant ones.\n\
         - weather: one item per hiking date with the highest temperature, lowest temperature, \
         precipitation probability and wind speed.\n\
         - news: a summary of recent news that may impact hiking safety.\n\
         - trails: the trails with their difficulty level and estimated ascent and descent \
         times.\n\
         - risk_analysis: for each relevant risk, a brief explanation of its relevance to this \
         hike and recommendations on how to mitigate it.\n\
         - links: the important links collected for this hike, as title and URL pairs.\n\
         Be brief and concise. Write all report text in Japanese.\n\
         The current date is {today}.",
        preamble = TEAM_PREAMBLE,
        mountain = mountain(state),
        dates = hiking_dates(state),
        weather = state.weather_report.as_deref().unwrap_or("(not collected)"),
        trail = state.trail_report.as_deref().unwrap_or("(not collected)"),
        news = state.news_report.as_deref().unwrap_or("(not collected)"),
        links = state.info_links.as_deref().unwrap_or("(not collected)"),
        today = current_date(state),
    )
}

pub fn planner_instruction() -> &'static str {
    "You are a Safe Hike Planning Agent. Your task is to help users plan safe hiking trips by \
     gathering necessary information and providing recommendations.\n\
     First, use the `set_mountain` and `set_hiking_dates` tools to record the mountain and \
     hiking dates provided by the user. Ask for anything that is missing.\n\
     Once both are recorded, call the `start_research` tool to delegate the research of \
     weather forecasts, recent news, trails and useful links to your workflow team; the team \
     compiles the final hiking report for the user.\n\
     Important: the dates provided by the user are relative to the current date. For example, \
     if someone says they will hike on June 4th, they mean June 4th of the current year. Use \
     the `get_current_date` tool whenever you need to resolve a relative date."
}
