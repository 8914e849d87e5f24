/// Image container formats recognized from leading magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    /// Sniff the format of `bytes`, falling back to PNG for anything unknown.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
            [0x89, 0x50, 0x4E, 0x47, ..] => Self::Png,
            [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Self::Webp,
            _ => {
                tracing::warn!(
                    "Unrecognized image format (first 4 bytes: {:02X?}), saving as png",
                    &bytes[..bytes.len().min(4)]
                );
                Self::Png
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_png() {
        assert_eq!(
            ImageFormat::detect(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_detect_jpeg() {
        let format = ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(format.extension(), "jpg");
    }

    #[test]
    fn test_detect_webp() {
        assert_eq!(
            ImageFormat::detect(&[
                0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00, 0x57, 0x45, 0x42, 0x50
            ]),
            ImageFormat::Webp
        );
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_png() {
        assert_eq!(ImageFormat::detect(&[0x00, 0x01, 0x02, 0x03]), ImageFormat::Png);
        assert_eq!(ImageFormat::detect(&[]).extension(), "png");
    }
}
