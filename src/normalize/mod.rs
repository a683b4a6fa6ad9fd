mod clean;
mod facets;
mod pipeline;
mod publication;
mod ratings;

pub use clean::{clean, BookRecord};
pub use facets::{extract, FacetTables};
pub use pipeline::{transform, NormalizedDataset};
pub use publication::{parse_publish_date, transform_publication_info};
pub use ratings::{transform_ratings, StarCountsError, StarCountsPolicy};
