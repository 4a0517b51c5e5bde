use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use shared::cluster;
use shared::forecast;
use shared::geo;
use shared::kite;
use shared::models::{ConditionScore, Difficulty, HourBucket, KiteSizeRecommendation, MarkerItem, ProjectedPoint};
use shared::scoring::{self, ConditionInput};

use crate::interactions::{self, Interaction};
use crate::spots::{SpotFilter, SpotSource};
use crate::weather::{WeatherSource, DEFAULT_FORECAST_HOURS};

pub async fn run(address: std::net::SocketAddr) {
    let spot_source = Arc::new(SpotSource::new());
    let weather_source = Arc::new(WeatherSource::new());

    let health_route = warp::path!("health").and(warp::get()).map(|| StatusCode::OK);

    let spots_route = warp::path!("spots")
        .and(warp::get())
        .and(warp::query::<SpotFilter>())
        .and(with_source(spot_source.clone()))
        .and_then(spot_list);

    let markers_route = warp::path!("markers")
        .and(warp::get())
        .and(warp::query::<MarkersQuery>())
        .and(with_source(spot_source.clone()))
        .and_then(markers);

    let forecast_route = warp::path!("forecast")
        .and(warp::get())
        .and(warp::query::<ForecastQuery>())
        .and(with_source(weather_source.clone()))
        .and_then(forecast_view);

    let conditions_route = warp::path!("conditions")
        .and(warp::post())
        .and(warp::body::json::<ConditionInput>())
        .and_then(conditions);

    let kite_size_route = warp::path!("kite-size")
        .and(warp::get())
        .and(warp::query::<KiteSizeQuery>())
        .and_then(kite_size);

    let interactions_route = warp::path!("interactions")
        .and(warp::post())
        .and(warp::body::json::<Interaction>())
        .and_then(record_interaction);

    let routes = health_route
        .or(spots_route)
        .or(markers_route)
        .or(forecast_route)
        .or(conditions_route)
        .or(kite_size_route)
        .or(interactions_route)
        .recover(rejection);

    log::info!("Listening on {}", address);
    warp::serve(routes).run(address).await
}

fn with_source<S: Send + Sync + 'static>(
    source: Arc<S>,
) -> impl Filter<Extract = (Arc<S>,), Error = Infallible> + Clone {
    warp::any().map(move || source.clone())
}

async fn spot_list(filter: SpotFilter, source: Arc<SpotSource>) -> Result<impl Reply, Rejection> {
    let list = source.fetch(&filter).await;
    Ok(warp::reply::json(&list))
}

#[derive(Debug, Deserialize)]
struct MarkersQuery {
    width: f64,
    height: f64,
    zoom: u8,
    country: Option<String>,
    difficulty: Option<Difficulty>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkersResponse {
    items: Vec<MarkerItem>,
    positions: Vec<ProjectedPoint>,
    clustered: bool,
    degraded: bool,
}

async fn markers(query: MarkersQuery, source: Arc<SpotSource>) -> Result<impl Reply, Rejection> {
    let filter = SpotFilter {
        country: query.country,
        difficulty: query.difficulty,
    };
    let list = source.fetch(&filter).await;

    let positions =
        cluster::project_visible(&list.spots, query.width, query.height, geo::VIEWPORT_PADDING);
    let clustered = cluster::should_cluster(query.zoom);

    let items = if clustered {
        cluster::cluster(
            &list.spots,
            query.width,
            query.height,
            cluster::CLUSTER_CELL_SIZE_PX,
        )
    } else {
        // At high zoom every visible spot renders on its own.
        let visible: std::collections::HashSet<&str> =
            positions.iter().map(|p| p.id.as_str()).collect();
        list.spots
            .iter()
            .filter(|s| visible.contains(s.id.as_str()))
            .cloned()
            .map(MarkerItem::Spot)
            .collect()
    };

    Ok(warp::reply::json(&MarkersResponse {
        items,
        positions,
        clustered,
        degraded: list.degraded,
    }))
}

#[derive(Debug, Deserialize)]
struct ForecastQuery {
    lat: f64,
    lon: f64,
    hours: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoredBucket {
    #[serde(flatten)]
    bucket: HourBucket,
    score: ConditionScore,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BestHour {
    day_index: usize,
    hour: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    day_labels: Vec<shared::models::DayLabel>,
    hour_buckets: Vec<ScoredBucket>,
    best_hours: Vec<BestHour>,
    estimated: bool,
}

async fn forecast_view(
    query: ForecastQuery,
    source: Arc<WeatherSource>,
) -> Result<impl Reply, Rejection> {
    let hours = query.hours.unwrap_or(DEFAULT_FORECAST_HOURS);
    let batch = source.fetch(query.lat, query.lon, hours).await;
    let forecast = forecast::aggregate(&batch.samples);

    let best_hours: Vec<BestHour> = (0..forecast.day_labels.len())
        .filter_map(|day_index| {
            let day: Vec<HourBucket> = forecast
                .hour_buckets
                .iter()
                .filter(|b| b.day_index == day_index)
                .cloned()
                .collect();
            forecast::best_bucket(&day).map(|b| BestHour {
                day_index,
                hour: b.hour,
            })
        })
        .collect();

    let hour_buckets = forecast
        .hour_buckets
        .into_iter()
        .map(|bucket| ScoredBucket {
            score: scoring::quick_score(bucket.wind_speed_avg, &bucket.icon),
            bucket,
        })
        .collect();

    Ok(warp::reply::json(&ForecastResponse {
        day_labels: forecast.day_labels,
        hour_buckets,
        best_hours,
        estimated: batch.estimated,
    }))
}

async fn conditions(input: ConditionInput) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&scoring::score_conditions(&input)))
}

#[derive(Debug, Deserialize)]
struct KiteSizeQuery {
    weight: f64,
    wind: f64,
}

async fn kite_size(query: KiteSizeQuery) -> Result<impl Reply, Rejection> {
    let recommendations: Vec<KiteSizeRecommendation> =
        kite::recommend_sizes(query.weight, query.wind);
    Ok(warp::reply::json(&recommendations))
}

async fn record_interaction(event: Interaction) -> Result<impl Reply, Rejection> {
    interactions::record(event);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
struct ErrorMessage {
    code: u16,
    message: String,
}

pub async fn rejection(err: warp::Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.")
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some()
        || err.find::<warp::reject::InvalidQuery>().is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid request.")
    } else {
        log::error!("Error: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    };

    let json = warp::reply::json(&ErrorMessage {
        code: code.as_u16(),
        message: message.into(),
    });

    Ok(warp::reply::with_status(json, code))
}
