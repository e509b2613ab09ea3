//! In-memory database linking NEOs to their close approaches
//!
//! `NeoDatabase` owns both collections as arenas and resolves the mutual
//! references between them in a single linkage pass at construction: each
//! approach whose designation matches a catalog entry gets its NEO handle
//! set, and the NEO's approach list gains the approach handle. That pass is
//! the only code path touching either side of the association.
//!
//! Approaches whose designation matches nothing stay unlinked — they are
//! expected (phantom observations) and remain queryable.

mod query;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::filters::AttributeFilter;
use crate::models::{ApproachId, CloseApproach, NearEarthObject, NeoId};

pub use query::limit;

/// The linked collection of NEOs and close approaches
///
/// Read-only after construction; queries never mutate it.
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    designation_index: HashMap<String, NeoId>,
    name_index: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Build the database from the full collections and perform the linkage
    /// pass. Linkage is a pure index lookup, so no ordering between the two
    /// collections is assumed.
    pub fn new(neos: Vec<NearEarthObject>, approaches: Vec<CloseApproach>) -> Self {
        let mut db = Self {
            neos,
            approaches,
            designation_index: HashMap::new(),
            name_index: HashMap::new(),
        };
        db.build_indexes();
        db.link_approaches();
        db
    }

    fn build_indexes(&mut self) {
        for (idx, neo) in self.neos.iter().enumerate() {
            let id = NeoId(idx);
            self.designation_index
                .insert(neo.designation().to_string(), id);
            if let Some(name) = neo.name() {
                // Duplicate display names resolve to the first catalog entry
                // carrying the name.
                self.name_index.entry(name.to_string()).or_insert(id);
            }
        }
    }

    /// The single code path that establishes the NEO <-> approach references.
    fn link_approaches(&mut self) {
        let mut linked = 0usize;
        for (idx, approach) in self.approaches.iter_mut().enumerate() {
            match self.designation_index.get(approach.designation()) {
                Some(&neo_id) => {
                    approach.set_neo(neo_id);
                    self.neos[neo_id.0].push_approach(ApproachId(idx));
                    linked += 1;
                }
                None => {
                    debug!(
                        designation = %approach.designation(),
                        "close approach matches no catalog entry"
                    );
                }
            }
        }
        info!(
            neos = self.neos.len(),
            approaches = self.approaches.len(),
            linked,
            "linked close approaches to catalog entries"
        );
    }

    /// Exact-match lookup by primary designation
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.designation_index
            .get(designation)
            .map(|id| &self.neos[id.0])
    }

    /// Exact-match, case-sensitive lookup by IAU name. The empty string
    /// never matches — unnamed NEOs carry no name at all.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        if name.is_empty() {
            return None;
        }
        self.name_index.get(name).map(|id| &self.neos[id.0])
    }

    /// Resolve a NEO handle
    pub fn neo(&self, id: NeoId) -> &NearEarthObject {
        &self.neos[id.0]
    }

    /// Resolve an approach handle
    pub fn approach(&self, id: ApproachId) -> &CloseApproach {
        &self.approaches[id.0]
    }

    /// The NEO an approach is linked to, if any
    pub fn neo_for(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo().map(|id| &self.neos[id.0])
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Stream the approaches matching every active filter, in insertion
    /// order.
    ///
    /// The stream is lazy and single-pass: each approach is tested exactly
    /// once, only as the caller advances it, so a consumer that stops early
    /// never causes the remainder to be evaluated. Dropping the iterator
    /// mid-stream is side-effect free.
    pub fn query<'a>(
        &'a self,
        filters: &'a [AttributeFilter],
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches.iter().filter(move |approach| {
            let neo = self.neo_for(approach);
            filters.iter().all(|f| f.matches(approach, neo))
        })
    }
}
