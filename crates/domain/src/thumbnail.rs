use serde::{Deserialize, Serialize};

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSpec {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            max_width: 100,
            max_height: 100,
            quality: 30,
        }
    }
}

impl ThumbnailSpec {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(DomainError::InvalidThumbnailSize {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }

    /// Scales `width`x`height` by the smaller of the two axis ratios so the result
    /// fits inside the target box with the aspect ratio kept. Small images are
    /// scaled up.
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (0, 0);
        }
        let width_ratio = f64::from(self.max_width) / f64::from(width);
        let height_ratio = f64::from(self.max_height) / f64::from(height);
        let ratio = width_ratio.min(height_ratio);

        let scaled_width = (f64::from(width) * ratio).round().max(1.0) as u32;
        let scaled_height = (f64::from(height) * ratio).round().max(1.0) as u32;
        (scaled_width, scaled_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        let spec = ThumbnailSpec::default();
        assert_eq!(spec.fit(400, 200), (100, 50));
        assert_eq!(spec.fit(300, 600), (50, 100));
        assert_eq!(spec.fit(50, 50), (100, 100));
    }

    #[test]
    fn validate_rejects_empty_box() {
        let spec = ThumbnailSpec {
            max_width: 0,
            ..ThumbnailSpec::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(DomainError::InvalidThumbnailSize { width: 0, .. })
        ));
    }
}
