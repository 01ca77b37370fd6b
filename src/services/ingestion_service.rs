use log::info;

use crate::models::course::Course;
use crate::services::geocoding_service::PlaceResolver;
use crate::services::kml_parser::{self, ParseError};

/// What an ingestion changed on the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub coordinates: usize,
    pub location_resolved: bool,
}

/// Parse a track file, resolve its starting point, and merge both into a
/// course draft. Nothing is persisted here.
pub struct CourseIngestionPipeline<'a, R: PlaceResolver> {
    resolver: &'a R,
}

impl<'a, R: PlaceResolver> CourseIngestionPipeline<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// On a parse failure the draft is left exactly as it was and the error
    /// is returned. An empty track or an unresolved place leaves the
    /// matching field at its previous value.
    pub async fn ingest(
        &self,
        draft: &mut Course,
        contents: &str,
    ) -> Result<IngestOutcome, ParseError> {
        let path = kml_parser::parse(contents)?;

        let mut outcome = IngestOutcome {
            coordinates: path.len(),
            location_resolved: false,
        };

        let Some(start) = path.first().copied() else {
            return Ok(outcome);
        };

        let place = self.resolver.resolve(start).await;

        draft.course_paths = path;
        if let Some(place) = place {
            draft.location_info = Some(place);
            outcome.location_resolved = true;
        }

        info!(
            "Ingested {} coordinates into {} (location resolved: {})",
            outcome.coordinates,
            draft.id.as_deref().unwrap_or("new course"),
            outcome.location_resolved
        );

        Ok(outcome)
    }
}
