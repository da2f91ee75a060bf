use crate::{Error, Result};
use std::borrow::Cow;
use std::collections::HashSet;

/// One bitmap of the iconset: its pixel dimension and its file name inside the
/// iconset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSize {
    pub pixels: u32,
    pub file_name: Cow<'static, str>,
}

impl IconSize {
    pub const fn new(pixels: u32, file_name: &'static str) -> IconSize {
        IconSize {
            pixels,
            file_name: Cow::Borrowed(file_name),
        }
    }
}

const MACOS_SIZES: &[IconSize] = &[
    IconSize::new(16, "icon_16x16.png"),
    IconSize::new(32, "icon_16x16@2x.png"),
    IconSize::new(32, "icon_32x32.png"),
    IconSize::new(64, "icon_32x32@2x.png"),
    IconSize::new(128, "icon_128x128.png"),
    IconSize::new(256, "icon_128x128@2x.png"),
    IconSize::new(256, "icon_256x256.png"),
    IconSize::new(512, "icon_256x256@2x.png"),
    IconSize::new(512, "icon_512x512.png"),
    IconSize::new(1024, "icon_512x512@2x.png"),
];

/// A list of icon sizes.
#[derive(Debug, Clone)]
pub struct IconSizes(Cow<'static, [IconSize]>);

impl IconSizes {
    /// Every entry `iconutil` expects in a macOS `.iconset`, from 16x16 up to
    /// 512x512@2x.
    pub const MACOS: Self = Self::new(MACOS_SIZES);

    pub const fn new(sizes: &'static [IconSize]) -> IconSizes {
        Self(Cow::Borrowed(sizes))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconSize> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that every entry names exactly one distinct, non-empty bitmap.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::EmptySizes);
        }

        let mut seen = HashSet::new();
        for size in self.iter() {
            if size.pixels == 0 {
                return Err(Error::ZeroSize(size.file_name.to_string()));
            }
            if !seen.insert(size.file_name.as_ref()) {
                return Err(Error::DuplicateFileName(size.file_name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for IconSizes {
    fn default() -> Self {
        IconSizes::MACOS
    }
}

impl<'a, 'b: 'a, I> From<I> for IconSizes
where
    I: IntoIterator<Item = &'a (u32, &'b str)>,
{
    fn from(value: I) -> Self {
        IconSizes(
            value
                .into_iter()
                .map(|&(pixels, name)| IconSize {
                    pixels,
                    file_name: Cow::Owned(name.to_owned()),
                })
                .collect::<Vec<_>>()
                .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_set_covers_every_iconset_slot() {
        let sizes = IconSizes::MACOS;
        assert_eq!(sizes.len(), 10);
        assert!(sizes.validate().is_ok());

        let pixels: Vec<u32> = sizes.iter().map(|s| s.pixels).collect();
        assert_eq!(pixels, [16, 32, 32, 64, 128, 256, 256, 512, 512, 1024]);
        assert_eq!(
            sizes.iter().last().unwrap().file_name,
            "icon_512x512@2x.png"
        );
    }

    #[test]
    fn rejects_duplicate_file_names() {
        let sizes = IconSizes::from(&[(16, "a.png"), (32, "a.png")]);
        assert!(matches!(
            sizes.validate(),
            Err(Error::DuplicateFileName(name)) if name == "a.png"
        ));
    }

    #[test]
    fn rejects_empty_and_zero_sizes() {
        let empty: &[(u32, &str)] = &[];
        assert!(matches!(
            IconSizes::from(empty).validate(),
            Err(Error::EmptySizes)
        ));
        assert!(matches!(
            IconSizes::from(&[(0, "zero.png")]).validate(),
            Err(Error::ZeroSize(_))
        ));
    }
}
