// ==================== ENRICHMENT JOIN ====================
// Junta cada documento primário ao documento relacionado (por id) e copia
// campos selecionados, com valores fixos quando a relação não existe

use futures::future::try_join_all;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

use crate::{database::Collection, utils::metrics, utils::AppError};

pub const UNKNOWN: &str = "Unknown";
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Which fields survive in each output item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Primary fields plus derived fields (derived win on collision).
    Merged,
    /// Derived fields only.
    DerivedOnly,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldSource {
    /// Copied from the related document, or `fallback` when the relation misses.
    Related {
        field: &'static str,
        fallback: &'static str,
    },
    /// Copied from the primary document itself when present.
    Primary { field: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub target: &'static str,
    pub source: FieldSource,
}

impl FieldMapping {
    pub const fn related(target: &'static str, field: &'static str, fallback: &'static str) -> Self {
        Self {
            target,
            source: FieldSource::Related { field, fallback },
        }
    }

    pub const fn primary(target: &'static str, field: &'static str) -> Self {
        Self {
            target,
            source: FieldSource::Primary { field },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EnrichmentPlan {
    /// Field on the primary document holding the related document's id.
    pub reference_field: &'static str,
    pub fields: &'static [FieldMapping],
    pub projection: Projection,
}

/// Reviews of a scholarship, joined to the reviewing user.
pub const REVIEWER_DETAILS: EnrichmentPlan = EnrichmentPlan {
    reference_field: "reviewer_id",
    fields: &[
        FieldMapping::related("reviewer_name", "name", UNKNOWN),
        FieldMapping::related("reviewer_image", "image", DEFAULT_IMAGE),
    ],
    projection: Projection::Merged,
};

/// Reviews written by one reviewer, reduced to what the dashboard lists.
pub const REVIEWED_SCHOLARSHIP: EnrichmentPlan = EnrichmentPlan {
    reference_field: "scholarship_id",
    fields: &[
        FieldMapping::related("scholarship_name", "subject_name", UNKNOWN),
        FieldMapping::related("university_name", "university_name", UNKNOWN),
        FieldMapping::primary("review_comments", "reviewer_comments"),
        FieldMapping::primary("review_date", "review_date"),
    ],
    projection: Projection::DerivedOnly,
};

/// Applications of one user, joined to the scholarship applied for.
pub const APPLIED_SCHOLARSHIP: EnrichmentPlan = EnrichmentPlan {
    reference_field: "scholarship_id",
    fields: &[
        FieldMapping::related("scholarship_name", "subject_name", UNKNOWN),
        FieldMapping::related("university_name", "university_name", UNKNOWN),
        // Existing clients read the university here, not the category.
        // Probably unintended; confirm with the product owner before changing.
        FieldMapping::related("scholarship_category", "university_name", UNKNOWN),
        FieldMapping::related("subject_name", "subject_name", UNKNOWN),
    ],
    projection: Projection::Merged,
};

/// Turns a reference value into an `_id` filter.
///
/// Hex strings are treated as ObjectIds; other strings are matched as-is.
/// Absent or non-id values resolve to nothing.
pub fn reference_filter(reference: Option<&Bson>) -> Option<Document> {
    match reference? {
        Bson::ObjectId(oid) => Some(doc! { "_id": *oid }),
        Bson::String(raw) if raw.is_empty() => None,
        Bson::String(raw) => match ObjectId::parse_str(raw) {
            Ok(oid) => Some(doc! { "_id": oid }),
            Err(_) => Some(doc! { "_id": raw.as_str() }),
        },
        _ => None,
    }
}

impl EnrichmentPlan {
    /// Builds one output item from a primary document and its related
    /// document, if the relation resolved.
    ///
    /// A related document that lacks a mapped field leaves that target out,
    /// and in a merged projection also drops the primary's field of the same
    /// name.
    pub fn project(&self, primary: Document, related: Option<&Document>) -> Document {
        let mut derived = Document::new();
        let mut cleared = Vec::new();

        for mapping in self.fields {
            match mapping.source {
                FieldSource::Related { field, fallback } => match related {
                    Some(related) => match related.get(field) {
                        Some(value) => {
                            derived.insert(mapping.target, value.clone());
                        }
                        None => cleared.push(mapping.target),
                    },
                    None => {
                        derived.insert(mapping.target, fallback);
                    }
                },
                FieldSource::Primary { field } => {
                    if let Some(value) = primary.get(field) {
                        derived.insert(mapping.target, value.clone());
                    }
                }
            }
        }

        match self.projection {
            Projection::Merged => {
                let mut merged = primary;
                for key in cleared {
                    merged.remove(key);
                }
                for (key, value) in derived {
                    merged.insert(key, value);
                }
                merged
            }
            Projection::DerivedOnly => derived,
        }
    }
}

/// Enriches every primary document with fields from `related`.
///
/// Lookups run concurrently, one per item; output keeps the input order.
/// A missing relation takes the plan's fallbacks, a store error fails the
/// whole call.
pub async fn enrich(
    primary: Vec<Document>,
    related: &Collection,
    plan: &EnrichmentPlan,
) -> Result<Vec<Document>, AppError> {
    let lookups = primary.into_iter().map(|item| async move {
        let found = match reference_filter(item.get(plan.reference_field)) {
            Some(filter) => related.find_one(filter).await?,
            None => None,
        };

        if found.is_none() {
            log::debug!(
                "🔗 {} reference {:?} not found in {}, using fallbacks",
                plan.reference_field,
                item.get(plan.reference_field),
                related.name()
            );
            metrics::increment_fallback_count();
        }

        Ok::<_, AppError>(plan.project(item, found.as_ref()))
    });

    try_join_all(lookups).await
}
