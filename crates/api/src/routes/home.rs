//! Route listing

use axum::response::Html;

/// Landing page listing every route, with usage examples
pub const ROUTES_PAGE: &str = concat!(
    "Welcome to the Hawaiian Weather API!<br/><br/>",
    "These are the available routes:<br/><br/>",
    "To see the precipitation from last year: /api/v1.0/precipitation<br/>",
    "To see the temperatures from last year: /api/v1.0/tobs<br/>",
    "To see information about the weather stations: /api/v1.0/stations<br/><br/>",
    "To see information about a specific date, add a date: /api/v1.0/&lt;start&gt;<br/>",
    "Example: /api/v1.0/2011-08-11<br/><br/>",
    "To see information about a specific date range, add a start and end date: ",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>",
    "Example: /api/v1.0/2011-08-11/2011-08-12<br/><br/>",
    "Note: the earliest date available is 2010-01-01, ",
    "and the latest date available is 2017-08-23",
);

/// List available routes
pub async fn list_routes() -> Html<&'static str> {
    metrics::counter!("weather_api_requests_total", "route" => "home").increment(1);
    Html(ROUTES_PAGE)
}
