use axum::Json;
use bucketgate_domain::Region;

use crate::dto::RegionResponse;

pub async fn list_regions_handler() -> Json<Vec<RegionResponse>> {
    Json(Region::all().iter().map(RegionResponse::from).collect())
}
