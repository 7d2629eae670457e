pub mod model;
pub mod sampler;
pub mod storage;

pub use model::{Conyuge, HrError, Hijo, Persona};
pub use sampler::{HRSampler, HrDataset};
pub use storage::HrStorage;
