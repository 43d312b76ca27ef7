pub mod registry;

#[allow(unused_imports)]
pub use registry::{MockRegistry, create_test_data_source, entry, metadata};
