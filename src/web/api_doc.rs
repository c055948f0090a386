use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::passes::{PairSummary, PassesResponse};
use crate::catalog::{FrequencyBand, GeoPosition, Satellite, Station};
use crate::pass::{EventKind, GeometrySample, QualifiedPass};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::passes::list_passes,
        super::api::passes::list_pairs,
    ),
    components(
        schemas(
            PassesResponse,
            PairSummary,
            ErrorResponse,
            QualifiedPass,
            GeometrySample,
            EventKind,
            Satellite,
            Station,
            FrequencyBand,
            GeoPosition,
        )
    ),
    info(
        title = "Pass-O-Mat API",
        description = "Overhead, sunlit satellite passes receivable by public web SDR stations",
        version = "0.1.0"
    ),
    tags(
        (name = "passes", description = "Pass prediction")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/passes"));
        assert!(doc.paths.paths.contains_key("/api/pairs"));
        let schemas = &doc.components.as_ref().unwrap().schemas;
        assert!(schemas.contains_key("QualifiedPass"));
        assert!(schemas.contains_key("ErrorResponse"));
    }
}
