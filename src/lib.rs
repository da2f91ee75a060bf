//! A crate for rendering a single-letter app icon at every size macOS wants
//! and packing the results into an ICNS file.
//!
//! Rendering and packing are done by external tools (see [`Toolchain`]). For
//! each size, a vector template is written to a temporary SVG, rasterized and
//! moved into an `.iconset` directory, which is finally handed to the bundler.
//!
//! ## Examples
//! ### Basic
//! ```no_run
//! # use icns_builder::IcnsBuilder;
//! IcnsBuilder::default()
//!     .iconset_dir("Aranet4.iconset")
//!     .build_file("Aranet4.icns");
//! ```
//!
//! ### Custom glyph and sizes
//! ```no_run
//! # use icns_builder::{IcnsBuilder, SvgTemplate};
//! IcnsBuilder::default()
//!     .sizes(&[(16, "icon_16x16.png"), (32, "icon_16x16@2x.png")])
//!     .template(SvgTemplate::default().glyph("b").background("#222"))
//!     .build_file("b.icns");
//! ```

mod error;
mod sizes;
mod template;
mod tools;

pub use error::{Error, Result};
pub use sizes::{IconSize, IconSizes};
pub use template::{corner_radius, font_size, SvgTemplate};
pub use tools::{MacToolchain, Toolchain};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Builds an ICNS file from a generated vector template.
#[derive(Debug)]
pub struct IcnsBuilder {
    sizes: IconSizes,
    template: SvgTemplate,
    iconset_dir: PathBuf,
    temp_dir: PathBuf,
    remove_iconset: bool,
}

impl Default for IcnsBuilder {
    fn default() -> Self {
        IcnsBuilder {
            sizes: IconSizes::default(),
            template: SvgTemplate::default(),
            iconset_dir: PathBuf::from("AppIcon.iconset"),
            temp_dir: PathBuf::from("."),
            remove_iconset: false,
        }
    }
}

impl IcnsBuilder {
    /// Customizes the bitmaps included in the ICNS file. Defaults to [`IconSizes::MACOS`].
    pub fn sizes(&mut self, sizes: impl Into<IconSizes>) -> &mut IcnsBuilder {
        self.sizes = sizes.into();
        self
    }

    pub fn template(&mut self, template: SvgTemplate) -> &mut IcnsBuilder {
        self.template = template;
        self
    }

    /// Directory the bitmaps are staged in before bundling. Its name must end
    /// in `.iconset`; any existing contents are removed when a build starts.
    pub fn iconset_dir(&mut self, dir: impl AsRef<Path>) -> &mut IcnsBuilder {
        self.iconset_dir = dir.as_ref().to_owned();
        self
    }

    /// Directory for the per-size SVG files. Defaults to the current directory.
    pub fn temp_dir(&mut self, dir: impl AsRef<Path>) -> &mut IcnsBuilder {
        self.temp_dir = dir.as_ref().to_owned();
        self
    }

    /// Deletes the iconset directory once the ICNS file has been created.
    pub fn remove_iconset(&mut self, remove: bool) -> &mut IcnsBuilder {
        self.remove_iconset = remove;
        self
    }

    /// Builds the ICNS file with the [`MacToolchain`] and writes it to `output_file_path`.
    pub fn build_file(&self, output_file_path: impl AsRef<Path>) -> Result<BuildReport> {
        self.build_file_with(&MacToolchain::default(), output_file_path)
    }

    /// Builds the ICNS file with the given tools.
    ///
    /// Tool failures don't produce an `Err`, they show up in the returned
    /// [`BuildReport`]. The bundler only runs when every size was staged.
    pub fn build_file_with(
        &self,
        tools: &impl Toolchain,
        output_file_path: impl AsRef<Path>,
    ) -> Result<BuildReport> {
        let output = output_file_path.as_ref();
        self.sizes.validate()?;
        if self.iconset_dir.extension().map_or(true, |ext| ext != "iconset") {
            return Err(Error::NotAnIconset(self.iconset_dir.clone()));
        }
        self.prepare(output)?;

        println!("Creating icon files...");
        let mut report = BuildReport::default();
        for size in self.sizes.iter() {
            match self.stage_icon(tools, size)? {
                Some(staged) => report.staged.push(staged),
                None => {
                    log::warn!("No bitmap produced for {}", size.file_name);
                    report.missing.push(size.clone());
                }
            }
        }

        println!("\nConverting iconset to icns...");
        if report.missing.is_empty() {
            if let Err(e) = tools.bundle(&self.iconset_dir, output) {
                log::warn!("Failed to run the bundler: {e}");
            }
        } else {
            log::warn!(
                "Skipping bundler, {} of {} sizes are missing",
                report.missing.len(),
                self.sizes.len()
            );
        }

        if output.exists() {
            println!("✓ Icon created successfully: {}", output.display());
            report.output = Some(output.to_owned());
            if self.remove_iconset {
                fs::remove_dir_all(&self.iconset_dir).map_err(|source| Error::Staging {
                    path: self.iconset_dir.clone(),
                    source,
                })?;
            }
        } else {
            println!("✗ Failed to create icon");
        }

        Ok(report)
    }

    /// Starts from an empty iconset and no output file, so that what's on
    /// disk afterwards was produced by this build.
    fn prepare(&self, output: &Path) -> Result<()> {
        let staging_error = |source: io::Error| Error::Staging {
            path: self.iconset_dir.clone(),
            source,
        };
        if self.iconset_dir.exists() {
            fs::remove_dir_all(&self.iconset_dir).map_err(staging_error)?;
        }
        fs::create_dir_all(&self.iconset_dir).map_err(staging_error)?;

        match fs::remove_file(output) {
            Ok(()) => log::info!("Removed previous {}", output.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn stage_icon(&self, tools: &impl Toolchain, size: &IconSize) -> Result<Option<StagedIcon>> {
        let svg = TempFile::create(
            self.temp_dir.join(format!("temp_{}.svg", size.pixels)),
            &self.template.render(size.pixels),
        )?;
        let target = self.iconset_dir.join(size.file_name.as_ref());

        // A bitmap left over from an interrupted run must not count as output.
        let rendered = tools.rasterized_path(svg.path(), &self.temp_dir);
        match fs::remove_file(&rendered) {
            Ok(()) => log::info!("Removed stale {}", rendered.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let rendered = match tools.rasterize(svg.path(), size.pixels, &self.temp_dir) {
            Ok(()) => Some(rendered).filter(|path| path.exists()),
            Err(e) => {
                log::warn!("Failed to run the rasterizer: {e}");
                None
            }
        };

        let source = match rendered {
            Some(rendered) => {
                fs::rename(&rendered, &target).map_err(|source| Error::Stage {
                    path: rendered.clone(),
                    source,
                })?;
                println!("Created {}", size.file_name);
                IconSource::Rasterized
            }
            None => {
                log::warn!("Rasterizer left no output for {}, resizing instead", size.file_name);
                if let Err(e) = tools.resize(svg.path(), size.pixels, &target) {
                    log::warn!("Failed to run the resizer: {e}");
                }
                IconSource::Resized
            }
        };

        if !target.exists() {
            return Ok(None);
        }
        check_dimensions(&target, size.pixels);

        Ok(Some(StagedIcon {
            size: size.clone(),
            path: target,
            source,
        }))
    }
}

/// Where a staged bitmap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    /// Produced by [`Toolchain::rasterize`].
    Rasterized,
    /// Produced by the [`Toolchain::resize`] fallback.
    Resized,
}

#[derive(Debug, Clone)]
pub struct StagedIcon {
    pub size: IconSize,
    pub path: PathBuf,
    pub source: IconSource,
}

/// The outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Bitmaps present in the iconset, in size order.
    pub staged: Vec<StagedIcon>,
    /// Sizes for which neither tool produced a bitmap.
    pub missing: Vec<IconSize>,
    /// The ICNS file, if the bundler created it.
    pub output: Option<PathBuf>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.output.is_some()
    }
}

// The two tools don't necessarily agree on output size, so mismatches are
// reported but the bitmap is kept.
fn check_dimensions(path: &Path, expected: u32) {
    match image::image_dimensions(path) {
        Ok((width, height)) if width == expected && height == expected => {}
        Ok((width, height)) => log::warn!(
            "{} is {width} × {height}, expected {expected} × {expected}",
            path.display()
        ),
        Err(e) => log::warn!("Could not read {}: {e}", path.display()),
    }
}

/// A file that is deleted when dropped.
struct TempFile(PathBuf);

impl TempFile {
    fn create(path: PathBuf, contents: &str) -> Result<TempFile> {
        match fs::write(&path, contents) {
            Ok(()) => Ok(TempFile(path)),
            Err(source) => {
                let _ = fs::remove_file(&path);
                Err(Error::Template { path, source })
            }
        }
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.0) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Failed to remove {}: {e}", self.0.display());
            }
        }
    }
}
