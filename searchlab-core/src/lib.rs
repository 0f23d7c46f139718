//! searchlab Core - Request and Result Types
//!
//! Everything the search pages need that does not touch the network:
//! the session value, request shapes and their builders, the response
//! envelope, highlighting, card projection, aggregation reports, failure
//! classification and request sequencing. No I/O lives here.

pub mod aggregation;
pub mod builder;
pub mod display;
pub mod error;
pub mod failure;
pub mod highlight;
pub mod request;
pub mod response;
pub mod sequence;
pub mod session;
pub mod upload;

pub use aggregation::{
    catalog_aggregations, format_usd_whole, AggregationReport, Bucket, MetricBucket, PriceStats,
    RangeBucket,
};
pub use builder::{
    aggregations, complex_search, fuzzy_search, match_query, multi_match, prefix_match,
    range_filter, vector_pair, wildcard_match, ComplexForm, FieldToggle, MultiMatchForm,
    COMPLEX_MIN_TERM, FUZZY_MIN_TERM, MULTI_MATCH_MIN_TERM, VECTOR_MIN_TERM,
};
pub use display::{format_number, placeholder_image, DisplayItem, PriceStyle, Projection};
pub use error::{QueryError, SessionError, UploadError};
pub use failure::{
    classify, FailureEnvelope, FailureKind, StatusCode, INDEX_NOT_FOUND_ALERT,
    INDEX_NOT_FOUND_MARKER,
};
pub use highlight::{highlight, highlight_escaped, BOLD_CLOSE, BOLD_OPEN};
pub use request::{
    AggregationSpec, ComplexField, ComplexSearch, ComplexSearchType, FieldBoost, FieldKind,
    FieldValue, MetricType, RangeBound, RangeBucketSpec, RangeOperator, SearchAttribute,
    SearchRequest, VectorKind, VectorMode, VectorQuery, VECTOR_FIELD,
};
pub use response::{AckEnvelope, Hit, HitList, ProductRecord, SearchEnvelope, SearchResult, TotalHits};
pub use sequence::{RequestSequencer, Ticket};
pub use session::Session;
pub use upload::{
    guess_content_type, sanitize_filename, CustomDocument, PresignedEnvelope, PresignedUpload,
    PresignedUrlRequest, ProductForm,
};
