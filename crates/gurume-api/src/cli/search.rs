//! `gurume search` -- one nearby search against the places provider.

use gurume_core::search::PlaceSearch;
use gurume_infra::config::BotConfig;
use gurume_types::query::{Query, Radius};

use crate::state::places_client;

pub async fn run(
    config: &BotConfig,
    lat: f64,
    lng: f64,
    radius: Radius,
    keywords: Vec<String>,
) -> anyhow::Result<()> {
    let mut query = Query::from_coordinates(lat, lng).with_radius(radius);
    query.keywords = keywords;

    let places = places_client(config)?.nearby_search(&query).await?;
    println!("{}", serde_json::to_string_pretty(&places)?);
    Ok(())
}
