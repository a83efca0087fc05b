//! Features Module - column layout, vectors and projection

pub mod layout;
pub mod projector;
pub mod vector;

pub use layout::{Column, LayoutInfo, FEATURE_COUNT, LAYOUT_VERSION};
pub use projector::FeatureProjector;
pub use vector::{FeatureVector, ScaledVector};
