
use chrono::NaiveDate;
use tracing::debug;

/// A location the traveler has added to their plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitListEntry {
    pub location_id: String,
    pub municipality: String,
    pub weather: Option<String>,
}

/// Per-session trip state.
///
/// Owned by one interactive session and passed explicitly; there is no
/// process-wide plan. Dropped at session end, never persisted.
#[derive(Debug, Clone)]
pub struct TripPlan {
    travel_date: NaiveDate,
    visit_list: Vec<VisitListEntry>,
    finalized: bool,
}

impl TripPlan {
    #[inline]
    pub fn new(travel_date: NaiveDate) -> Self {
        Self {
            travel_date,
            visit_list: Vec::new(),
            finalized: false,
        }
    }

    #[inline]
    pub fn travel_date(&self) -> NaiveDate {
        self.travel_date
    }

    #[inline]
    pub fn visit_list(&self) -> &[VisitListEntry] {
        &self.visit_list
    }

    #[inline]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visit_list.is_empty()
    }

    /// Add a location to the visit list. Returns false if the location is
    /// already planned or the plan has been finalized.
    #[inline]
    pub fn add(&mut self, entry: VisitListEntry) -> bool {
        if self.finalized {
            debug!("Ignoring add to finalized plan: {}", entry.location_id);
            return false;
        }
        if self
            .visit_list
            .iter()
            .any(|existing| existing.location_id == entry.location_id)
        {
            debug!("{} is already in the visit list", entry.location_id);
            return false;
        }

        debug!("Added {} to the visit list", entry.location_id);
        self.visit_list.push(entry);
        true
    }

    /// Attach a weather snapshot to an already-planned location
    #[inline]
    pub fn set_weather(&mut self, location_id: &str, weather: String) {
        if let Some(entry) = self
            .visit_list
            .iter_mut()
            .find(|entry| entry.location_id == location_id)
        {
            entry.weather = Some(weather);
        }
    }

    /// Clear the visit list and reopen the plan
    #[inline]
    pub fn reset(&mut self) {
        debug!("Resetting visit list ({} entries)", self.visit_list.len());
        self.visit_list.clear();
        self.finalized = false;
    }

    /// Mark the plan final. Returns false when there is nothing to finalize.
    #[inline]
    pub fn finalize(&mut self) -> bool {
        if self.visit_list.is_empty() {
            return false;
        }
        self.finalized = true;
        true
    }
}
