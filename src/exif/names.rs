//! Display-name resolution for EXIF tag ids.
//!
//! A small override table takes precedence over the standard dictionary
//! shipped with the `exif` crate; tags unknown to both have no display name
//! and are skipped by the translator.

/// Names taking precedence over the standard dictionary.
const NAME_OVERRIDES: &[(u16, &str)] = &[
    (37385, "FlashInfo"),
    (40960, "FlashpixVersion"),
    (40962, "PixelXDimension"),
    (40963, "PixelYDimension"),
];

/// Resolve the display name for a tag id, override table first.
pub fn display_name(tag_id: u16) -> Option<String> {
    if let Some((_, name)) = NAME_OVERRIDES.iter().find(|(id, _)| *id == tag_id) {
        return Some((*name).to_string());
    }
    standard_name(tag_id)
}

/// Look the id up in the standard dictionary, trying the TIFF (IFD0) context
/// before the Exif IFD context. Raw tag maps flatten both IFDs into one
/// id space, so both contexts must be consulted.
fn standard_name(tag_id: u16) -> Option<String> {
    for context in [exif::Context::Tiff, exif::Context::Exif] {
        let tag = exif::Tag(context, tag_id);
        if tag.description().is_some() {
            return Some(tag.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_the_dictionary() {
        // 37385 is "Flash" in the standard dictionary
        assert_eq!(display_name(37385).as_deref(), Some("FlashInfo"));
        assert_eq!(display_name(40962).as_deref(), Some("PixelXDimension"));
    }

    #[test]
    fn known_tags_resolve_in_both_contexts() {
        // 271 (Make) lives in IFD0, 33434 (ExposureTime) in the Exif IFD
        assert_eq!(display_name(271).as_deref(), Some("Make"));
        assert_eq!(display_name(33434).as_deref(), Some("ExposureTime"));
        assert_eq!(display_name(37386).as_deref(), Some("FocalLength"));
    }

    #[test]
    fn unknown_tags_have_no_name() {
        assert_eq!(display_name(65000), None);
    }
}
