use crate::error::{ConvolveError, Result};

/// Configuration carried by a [`Convolver`](crate::Convolver)
///
/// Stride and padding are accepted and stored but are not applied: every
/// valid output position is computed at step 1 with no zero-extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolveConfig {
    /// Step between output positions, at least 1
    pub stride: usize,
    /// Zero border added around the input
    pub padding: usize,
}

impl Default for ConvolveConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            padding: 0,
        }
    }
}

impl ConvolveConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(ConvolveError::InvalidConfig(format!(
                "stride must be at least 1, got {}",
                self.stride
            )));
        }
        Ok(())
    }

    /// True when stride and padding hold their no-op defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
