//! Metadata encoder implementations

mod raw;
mod structured;

pub use raw::RawJsonEncoder;
pub use structured::StructuredEncoder;

use std::sync::Arc;

use crate::config::Encoding;
use crate::version::encoder::MetadataEncoder;

/// Select the encoder for the configured encoding
pub fn encoder_for(encoding: Encoding) -> Arc<dyn MetadataEncoder> {
    match encoding {
        Encoding::Structured => Arc::new(StructuredEncoder),
        Encoding::Raw => Arc::new(RawJsonEncoder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Encoding::Structured, "metadata")]
    #[case(Encoding::Raw, "raw_metadata")]
    fn encoder_for_selects_attribute(#[case] encoding: Encoding, #[case] expected: &str) {
        assert_eq!(encoder_for(encoding).attribute_name(), expected);
    }
}
