pub mod feature;
pub mod filter;
pub mod geometry;
pub mod options;
pub mod value;

pub use feature::{FeatureRecord, FeatureState};
pub use filter::{ComparisonOp, Filter};
pub use geometry::{Bounds, Geometry};
pub use options::{ReadOptions, WriteOptions};
pub use value::{Attributes, FieldKind, Value};
