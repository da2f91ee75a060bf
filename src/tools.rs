//! The external programs that do the actual image work.
//!
//! Tools are judged by what they leave on disk, not by their exit codes: an
//! `Err` from a [`Toolchain`] method only means the process could not be
//! started at all.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

pub trait Toolchain {
    /// Where [`Toolchain::rasterize`] leaves the bitmap for `svg`. Quick Look
    /// names its thumbnail after the full source file name.
    fn rasterized_path(&self, svg: &Path, out_dir: &Path) -> PathBuf {
        let mut file_name = svg.file_name().unwrap_or(svg.as_os_str()).to_owned();
        file_name.push(".png");
        out_dir.join(file_name)
    }

    /// Renders `svg` as a `size` x `size` bitmap at
    /// [`Toolchain::rasterized_path`] inside `out_dir`.
    fn rasterize(&self, svg: &Path, size: u32, out_dir: &Path) -> io::Result<()>;

    /// Converts `svg` to a `size` x `size` PNG written to `output`. Used when
    /// [`Toolchain::rasterize`] leaves nothing behind.
    fn resize(&self, svg: &Path, size: u32, output: &Path) -> io::Result<()>;

    /// Packs the `iconset` directory into a single icon file at `output`.
    fn bundle(&self, iconset: &Path, output: &Path) -> io::Result<()>;
}

/// The tools shipped with macOS: Quick Look (`qlmanage`) for rendering,
/// `sips` for resampling and `iconutil` for packing the `.icns`.
#[derive(Debug, Clone)]
pub struct MacToolchain {
    rasterizer: Cow<'static, str>,
    resizer: Cow<'static, str>,
    bundler: Cow<'static, str>,
}

impl Default for MacToolchain {
    fn default() -> Self {
        MacToolchain {
            rasterizer: Cow::Borrowed("qlmanage"),
            resizer: Cow::Borrowed("sips"),
            bundler: Cow::Borrowed("iconutil"),
        }
    }
}

impl MacToolchain {
    /// Uses other programs with the same command lines as `qlmanage`, `sips`
    /// and `iconutil`.
    pub fn with_programs(
        rasterizer: impl Into<Cow<'static, str>>,
        resizer: impl Into<Cow<'static, str>>,
        bundler: impl Into<Cow<'static, str>>,
    ) -> Self {
        MacToolchain {
            rasterizer: rasterizer.into(),
            resizer: resizer.into(),
            bundler: bundler.into(),
        }
    }
}

impl Toolchain for MacToolchain {
    fn rasterize(&self, svg: &Path, size: u32, out_dir: &Path) -> io::Result<()> {
        let size = size.to_string();
        run(
            &self.rasterizer,
            [
                OsStr::new("-t"),
                OsStr::new("-s"),
                OsStr::new(&size),
                OsStr::new("-o"),
                out_dir.as_os_str(),
                svg.as_os_str(),
            ],
        )?;
        Ok(())
    }

    fn resize(&self, svg: &Path, size: u32, output: &Path) -> io::Result<()> {
        let size = size.to_string();
        run(
            &self.resizer,
            [
                OsStr::new("-s"),
                OsStr::new("format"),
                OsStr::new("png"),
                OsStr::new("--resampleHeightWidth"),
                OsStr::new(&size),
                OsStr::new(&size),
                OsStr::new("-s"),
                OsStr::new("formatOptions"),
                OsStr::new("best"),
                OsStr::new("--out"),
                output.as_os_str(),
                svg.as_os_str(),
            ],
        )?;
        Ok(())
    }

    fn bundle(&self, iconset: &Path, output: &Path) -> io::Result<()> {
        run(
            &self.bundler,
            [
                OsStr::new("-c"),
                OsStr::new("icns"),
                iconset.as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ],
        )?;
        Ok(())
    }
}

fn run<'a>(program: &str, args: impl IntoIterator<Item = &'a OsStr>) -> io::Result<ExitStatus> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    log::debug!("Running {command:?}");
    let status = command.status()?;
    if !status.success() {
        log::debug!("{program} exited with {status}");
    }
    Ok(status)
}
