//! # Crystal Metrics
//!
//! Condenses a user's content and rating aggregates into the scalar and
//! presentation metrics of their crystal.
//!
//! Every formula here is an exact contract:
//!
//! - diversity: Shannon entropy over content types, base 2, normalized by
//!   `log2(5)` (the five known content types)
//! - interaction: `views*0.3 + downloads*0.5 + helpful*1.0`
//! - engagement: `ratings_given*0.4 + participation_days*0.6`
//! - facets: `clamp(4 + content/2 + diversity*20, 4, 50)`
//! - glow: `clamp(log10(interaction+1)/4, 0, 1)`
//! - purity: `clamp(0.3 + log10(engagement+1)/5, 0.3, 1)`
//!
//! Recalculation is a pure function of the aggregate snapshot plus the
//! caller's clock; two calls over unchanged data produce identical rows,
//! mesh included, apart from the timestamp.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CrystalResult;
use crate::geometry::{CrystalGeometry, CrystalGeometryBuilder};
use crate::store::CrystalMetricStore;

/// Crystal color when a user has no published content.
pub const DEFAULT_COLOR: &str = "#94a3b8";

/// The five known content types.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ContentType {
    /// Written guides and articles.
    Document = 0,
    /// Video uploads.
    Video = 1,
    /// Audio uploads.
    Audio = 2,
    /// Image galleries.
    Image = 3,
    /// External link collections.
    Link = 4,
}

impl ContentType {
    /// Number of known content types; normalizes the diversity entropy.
    pub const COUNT: u32 = 5;

    /// Display color of this content type's crystal facets.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Document => "#3b82f6",
            Self::Video => "#ef4444",
            Self::Audio => "#8b5cf6",
            Self::Image => "#10b981",
            Self::Link => "#f59e0b",
        }
    }
}

/// Read-side snapshot of a user's content and rating aggregates.
///
/// Produced by the external aggregate reader; the core never queries
/// content rows itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAggregates {
    /// Published content counts by type.
    pub published_by_type: BTreeMap<ContentType, u64>,
    /// Total views across the user's published content.
    pub total_views: u64,
    /// Total downloads across the user's published content.
    pub total_downloads: u64,
    /// "Helpful" ratings received.
    pub helpful_ratings: u64,
    /// Ratings the user has given to others.
    pub ratings_given: u64,
    /// Unix timestamp of the user's first published content, if any.
    pub first_content_at: Option<i64>,
}

impl ContentAggregates {
    /// Total published content across all types.
    #[must_use]
    pub fn total_content(&self) -> u64 {
        self.published_by_type.values().sum()
    }
}

/// One user's crystal row. Fully derived; recomputed on every
/// recalculation, never incrementally mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrystalMetric {
    /// Owning user.
    pub user_id: u64,
    /// Total published content count.
    pub total_content_count: u64,
    /// Shannon diversity over content types, in [0,1].
    pub diversity_index: f64,
    /// Weighted view/download/rating score, >= 0.
    pub interaction_score: f64,
    /// Weighted rating/participation score, >= 0.
    pub engagement_score: f64,
    /// Mesh facet count, in [4,50].
    pub facet_count: u32,
    /// Glow intensity, in [0,1].
    pub glow_intensity: f64,
    /// Purity level, in [0.3,1].
    pub purity_level: f64,
    /// Up to 3 dominant hex colors, most published type first.
    pub dominant_colors: Vec<String>,
    /// The generated mesh, cached with the row.
    pub cached_geometry: CrystalGeometry,
    /// Unix timestamp of this recalculation.
    pub last_calculated_at: i64,
}

/// Computes crystal metrics from aggregate snapshots.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrystalMetricCalculator {
    geometry: CrystalGeometryBuilder,
}

impl CrystalMetricCalculator {
    /// Smallest facet count.
    pub const MIN_FACETS: u32 = 4;
    /// Largest facet count.
    pub const MAX_FACETS: u32 = 50;

    /// Creates a calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            geometry: CrystalGeometryBuilder::new(),
        }
    }

    /// Shannon-entropy diversity over the content-type distribution,
    /// base 2, normalized by `log2(5)`. Empty input is 0.
    #[must_use]
    pub fn diversity_index(&self, counts: &BTreeMap<ContentType, u64>) -> f64 {
        let total: u64 = counts.values().sum();
        if total == 0 {
            return 0.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let total_f = total as f64;
        let mut entropy = 0.0;
        for &count in counts.values() {
            if count == 0 {
                continue;
            }
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / total_f;
            entropy -= p * p.log2();
        }

        let max_entropy = f64::from(ContentType::COUNT).log2();
        (entropy / max_entropy).clamp(0.0, 1.0)
    }

    /// Weighted interaction score, rounded to 2 decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn interaction_score(&self, views: u64, downloads: u64, helpful_ratings: u64) -> f64 {
        round2(views as f64 * 0.3 + downloads as f64 * 0.5 + helpful_ratings as f64)
    }

    /// Weighted engagement score, rounded to 2 decimals.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_score(&self, ratings_given: u64, participation_days: u64) -> f64 {
        round2(ratings_given as f64 * 0.4 + participation_days as f64 * 0.6)
    }

    /// Whole days since the first published content, floored at 1. A user
    /// with no content participates for 1 day.
    #[must_use]
    pub fn participation_days(&self, first_content_at: Option<i64>, now: i64) -> u64 {
        match first_content_at {
            None => 1,
            Some(first) => {
                let days = now.saturating_sub(first) / 86_400;
                u64::try_from(days.max(1)).unwrap_or(1)
            }
        }
    }

    /// Facet count from content volume and diversity, clamped to [4,50].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn facet_count(&self, content_count: u64, diversity_index: f64) -> u32 {
        let from_content = content_count / 2;
        let from_diversity = (diversity_index * 20.0).floor() as u64;
        let facets = u64::from(Self::MIN_FACETS) + from_content + from_diversity;
        u32::try_from(facets)
            .unwrap_or(Self::MAX_FACETS)
            .clamp(Self::MIN_FACETS, Self::MAX_FACETS)
    }

    /// Glow intensity from the interaction score, in [0,1] rounded to 2
    /// decimals. Zero interaction stays dark.
    #[must_use]
    pub fn glow_intensity(&self, interaction_score: f64) -> f64 {
        if interaction_score <= 0.0 {
            return 0.0;
        }
        round2(((interaction_score + 1.0).log10() / 4.0).clamp(0.0, 1.0))
    }

    /// Purity level from the engagement score, in [0.3,1] rounded to 2
    /// decimals.
    #[must_use]
    pub fn purity_level(&self, engagement_score: f64) -> f64 {
        if engagement_score <= 0.0 {
            return 0.3;
        }
        round2((0.3 + (engagement_score + 1.0).log10() / 5.0).clamp(0.3, 1.0))
    }

    /// Up to 3 hex colors for the most-published content types, largest
    /// count first. Ties break in content-type order, keeping the result
    /// stable. A user with no content gets the default color.
    #[must_use]
    pub fn dominant_colors(&self, counts: &BTreeMap<ContentType, u64>) -> Vec<String> {
        let mut ranked: Vec<(ContentType, u64)> = counts
            .iter()
            .map(|(&ty, &count)| (ty, count))
            .filter(|&(_, count)| count > 0)
            .collect();
        if ranked.is_empty() {
            return vec![DEFAULT_COLOR.to_string()];
        }
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(3)
            .map(|(ty, _)| ty.color().to_string())
            .collect()
    }

    /// Recomputes the full crystal row for one user and upserts it.
    ///
    /// Idempotent: unchanged aggregates yield an identical row (mesh
    /// included) apart from `last_calculated_at`.
    ///
    /// # Errors
    ///
    /// Storage failures propagate unchanged. Geometry errors cannot occur
    /// from this path: the facet count is already clamped to [4,50] and the
    /// palette is never empty.
    pub fn recalculate<S>(
        &self,
        store: &mut S,
        user_id: u64,
        aggregates: &ContentAggregates,
        now: i64,
    ) -> CrystalResult<CrystalMetric>
    where
        S: CrystalMetricStore,
    {
        let total_content = aggregates.total_content();
        let diversity = self.diversity_index(&aggregates.published_by_type);
        let interaction = self.interaction_score(
            aggregates.total_views,
            aggregates.total_downloads,
            aggregates.helpful_ratings,
        );
        let days = self.participation_days(aggregates.first_content_at, now);
        let engagement = self.engagement_score(aggregates.ratings_given, days);
        let facets = self.facet_count(total_content, diversity);
        let colors = self.dominant_colors(&aggregates.published_by_type);
        let geometry = self.geometry.build(facets, &colors)?;

        let metric = CrystalMetric {
            user_id,
            total_content_count: total_content,
            diversity_index: diversity,
            interaction_score: interaction,
            engagement_score: engagement,
            facet_count: facets,
            glow_intensity: self.glow_intensity(interaction),
            purity_level: self.purity_level(engagement),
            dominant_colors: colors,
            cached_geometry: geometry,
            last_calculated_at: now,
        };
        store.upsert(metric.clone())?;
        tracing::debug!(user_id, facets, "recalculated crystal metric");
        Ok(metric)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
