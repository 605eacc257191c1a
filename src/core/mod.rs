pub mod registry;
pub mod sampler;
pub mod series;
pub mod types;

pub use registry::FunctionRegistry;
pub use sampler::{SampleIter, sample};
pub use series::CurveSeries;
pub use types::{Axis, Domain, SamplePoint};

#[cfg(feature = "parallel-sampling")]
pub use sampler::sample_parallel;
