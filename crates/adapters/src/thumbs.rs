use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat};
use shutterbox_application::{ApplicationError, ThumbnailArtifact, ThumbnailGenerator};
use shutterbox_domain::ThumbnailSpec;

/// Decodes any JPEG/PNG and re-encodes a fitted JPEG thumbnail.
#[derive(Debug, Default)]
pub struct ImageThumbnailGenerator;

impl ThumbnailGenerator for ImageThumbnailGenerator {
    fn generate(
        &self,
        image_data: &[u8],
        spec: ThumbnailSpec,
    ) -> Result<ThumbnailArtifact, ApplicationError> {
        spec.validate()?;
        let image = image::load_from_memory(image_data)
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        let (width, height) = spec.fit(image.width(), image.height());
        let thumb = DynamicImage::ImageRgb8(image.thumbnail_exact(width, height).to_rgb8());

        let mut encoded = Cursor::new(Vec::new());
        thumb
            .write_to(&mut encoded, ImageOutputFormat::Jpeg(spec.quality))
            .map_err(|error| ApplicationError::Decode(error.to_string()))?;

        Ok(ThumbnailArtifact {
            data: encoded.into_inner(),
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb, Rgba};

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |_x, _y| Rgba([10_u8, 20_u8, 30_u8, 128_u8]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn creates_fitted_jpeg_thumbnail() {
        let source = encode_png(500, 300);

        let out = ImageThumbnailGenerator
            .generate(&source, ThumbnailSpec::default())
            .expect("thumbnail");

        assert_eq!((out.width, out.height), (100, 60));
        assert_eq!(
            image::guess_format(&out.data).expect("format"),
            ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&out.data).expect("decode thumbnail");
        assert_eq!((decoded.width(), decoded.height()), (100, 60));
    }

    #[test]
    fn jpeg_source_is_accepted() {
        let img = ImageBuffer::from_fn(40, 80, |_x, _y| Rgb([200_u8, 10_u8, 10_u8]));
        let mut source = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut source, ImageOutputFormat::Jpeg(90))
            .expect("encode jpeg");

        let out = ImageThumbnailGenerator
            .generate(&source.into_inner(), ThumbnailSpec::default())
            .expect("thumbnail");
        assert_eq!((out.width, out.height), (50, 100));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let result = ImageThumbnailGenerator.generate(b"not an image", ThumbnailSpec::default());
        assert!(matches!(result, Err(ApplicationError::Decode(_))));
    }
}
