//! Typed failure taxonomy for the collection pipeline.
//!
//! Every variant signals a data-quality or programming defect in a batch
//! run over static input. Nothing here is transient and nothing is
//! retried; the caller decides whether to abort the whole run or skip a
//! tier.

use thiserror::Error;

/// Failure of a single-ring computation. Part and record context is
/// attached by callers that know it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("ring has {count} points, need at least 3")]
    TooFewPoints { count: usize },

    #[error("ring is not closed (first point differs from last)")]
    Unclosed,

    #[error("ring encloses zero area, cannot place a centroid")]
    ZeroArea,
}

/// Failure while assembling one record's geometry from its raw parts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape has no part offsets")]
    NoParts,

    #[error("part offsets are not ascending within the {points}-point sequence")]
    BadPartOffsets { points: usize },

    #[error("part {part}: {source}")]
    Ring {
        part: usize,
        #[source]
        source: RingError,
    },
}

/// Fatal pipeline failures surfaced with enough context for a human to
/// add or fix a correction rule.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("dataset holds {shapes} shapes but {records} records")]
    RecordMismatch { shapes: usize, records: usize },

    #[error("record {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: ShapeError,
    },

    #[error("record {index}: duplicate name {name:?} not covered by any correction rule")]
    DuplicateName { index: usize, name: String },

    #[error("record {index}: merge target {target:?} is not yet registered")]
    MergeTargetMissing { index: usize, target: String },

    #[error("record {index}: merge rule skips {skip} rings but the record has only {count}")]
    MergeSkipOutOfRange {
        index: usize,
        skip: usize,
        count: usize,
    },

    #[error("bundled correction table is invalid: {0}")]
    RuleTable(#[from] toml::de::Error),
}
