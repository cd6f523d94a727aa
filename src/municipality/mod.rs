
use tracing::debug;

use crate::corpus::Document;

/// Sentinel returned when no municipality text mentions the location
pub const UNKNOWN_MUNICIPALITY: &str = "Unknown Municipality";

/// Find which municipality's description mentions a location id.
///
/// Case-insensitive substring containment of the id against each
/// municipality body, first match in corpus order wins. This is a
/// best-effort heuristic join: short or common location names can match the
/// wrong municipality, so treat the result as enrichment rather than an
/// authoritative lookup.
#[inline]
pub fn resolve(location_id: &str, municipalities: &[Document]) -> String {
    let needle = location_id.to_lowercase();

    for municipality in municipalities {
        if municipality.text.to_lowercase().contains(&needle) {
            debug!("Resolved {} to {}", location_id, municipality.id);
            return municipality.id.clone();
        }
    }

    debug!("No municipality found for {}", location_id);
    UNKNOWN_MUNICIPALITY.to_string()
}
