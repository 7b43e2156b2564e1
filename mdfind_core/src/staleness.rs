//! Incremental rebuild detection
//!
//! Maps each discovered source onto the output it would produce and keeps the
//! pairs whose output is missing or older than the source.

use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::config::StalenessConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::discovery::{MatchSet, serialize_path_lossy};
use crate::error::{IoError, Result};

/// A source that needs rebuilding and the output it should be written to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildPair {
    #[serde(serialize_with = "serialize_path_lossy")]
    source: PathBuf,
    #[serde(serialize_with = "serialize_path_lossy")]
    destination: PathBuf,
}

impl RebuildPair {
    pub fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// Outcome of comparing a source with its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The output does not exist yet
    Missing,
    /// The source was modified after the output
    Outdated,
    /// The output is at least as new as the source
    Fresh,
}

impl Staleness {
    pub fn needs_rebuild(self) -> bool {
        !matches!(self, Self::Fresh)
    }
}

/// Why no output path could be derived for a source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("not under source root {}", .0.display())]
    OutsideRoot(PathBuf),

    #[error("path has no file name")]
    NoFileName,
}

/// Strip `root` from `source`, then drop the last extension of the file name
///
/// `docs/guide/intro.md` with root `docs` becomes `guide/intro`. A leading dot
/// is not an extension, so `.profile` is kept whole; `a.tar.gz` loses only
/// `.gz`.
pub fn derive_basename(
    source: &Path,
    root: Option<&Path>,
) -> std::result::Result<PathBuf, DerivationError> {
    let relative = match root {
        Some(root) => source
            .strip_prefix(root)
            .map_err(|_| DerivationError::OutsideRoot(root.to_path_buf()))?,
        None => source,
    };

    let stem = Path::new(relative.file_name().ok_or(DerivationError::NoFileName)?)
        .file_stem()
        .ok_or(DerivationError::NoFileName)?;

    Ok(relative.with_file_name(stem))
}

/// Compare modification times of `source` and `destination`
///
/// Equal timestamps count as fresh, so re-running over unchanged inputs
/// schedules nothing.
pub fn assess(source: &Path, destination: &Path) -> Result<Staleness> {
    let out_modified = match fs::metadata(destination) {
        Ok(metadata) => modified(destination, &metadata)?,
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            return Ok(Staleness::Missing);
        }
        Err(e) => return Err(IoError::from_std(e).with_path(destination).into()),
    };

    let metadata =
        fs::metadata(source).map_err(|e| IoError::from_std(e).with_path(source))?;
    let in_modified = modified(source, &metadata)?;

    if in_modified > out_modified {
        Ok(Staleness::Outdated)
    } else {
        Ok(Staleness::Fresh)
    }
}

fn modified(path: &Path, metadata: &fs::Metadata) -> Result<SystemTime> {
    metadata
        .modified()
        .map_err(|e| IoError::from_std(e).with_path(path).into())
}

/// Decides which discovered sources need rebuilding
#[derive(Debug, Clone)]
pub struct StalenessResolver {
    config: StalenessConfig,
}

impl StalenessResolver {
    pub fn new(config: StalenessConfig) -> Self {
        Self { config }
    }

    /// Fail unless the destination root, when set, is an existing directory
    pub fn check_destination_root(&self) -> Result<()> {
        let Some(dest) = self.config.dest_root.as_deref() else {
            return Ok(());
        };
        if dest.as_os_str().is_empty() {
            return Ok(());
        }

        let metadata = fs::metadata(dest).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => IoError::not_found(dest),
            io::ErrorKind::PermissionDenied => IoError::permission_denied(dest, e),
            _ => IoError::from_std(e).with_path(dest),
        })?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(IoError::not_a_directory(dest).into())
        }
    }

    /// Output path for `source`
    pub fn destination_for(&self, source: &Path) -> std::result::Result<PathBuf, DerivationError> {
        let basename = derive_basename(source, self.config.strip_prefix())?;

        let mut file_name = OsString::from(
            basename
                .file_name()
                .ok_or(DerivationError::NoFileName)?,
        );
        file_name.push(self.config.out_extension());
        let relative = basename.with_file_name(file_name);

        Ok(match self.config.dest_root.as_deref() {
            Some(dest) => dest.join(relative),
            None => relative,
        })
    }

    /// Pairs for every source in `matches` whose output is missing or older
    ///
    /// Pairs keep the order of `matches`. Sources without a derivable output
    /// are skipped and reported as [`Diagnostic::Excluded`].
    pub fn resolve(
        &self,
        matches: &MatchSet,
        diagnostics: Diagnostics<'_>,
    ) -> Result<Vec<RebuildPair>> {
        let mut pairs = Vec::with_capacity(matches.len());

        for source in matches.iter() {
            let destination = match self.destination_for(source) {
                Ok(destination) => destination,
                Err(reason) => {
                    log::debug!("No destination for {}: {reason}", source.display());
                    diagnostics.report(Diagnostic::Excluded {
                        path: source.to_path_buf(),
                        reason: reason.to_string(),
                    });
                    continue;
                }
            };

            let staleness = assess(source, &destination)?;
            log::trace!(
                "{} -> {}: {staleness:?}",
                source.display(),
                destination.display()
            );

            if staleness.needs_rebuild() {
                diagnostics.report(Diagnostic::Candidate(destination.clone()));
                pairs.push(RebuildPair::new(source.to_path_buf(), destination));
            }
        }

        diagnostics.report(Diagnostic::UpdateList(
            pairs.iter().map(|p| p.destination.clone()).collect(),
        ));

        Ok(pairs)
    }
}
