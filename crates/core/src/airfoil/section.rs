//! Airfoil section variants
//!
//! A wing section is either a coordinate file or a NACA designation. Both
//! render to the same two-part section descriptor (a keyword plus its value)
//! and to a load directive for a 2-D section solver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AeroError, Result};

/// Keyword and value pair that identifies a section to an external solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDescriptor {
    /// `AFILE` or `NACA`
    pub keyword: &'static str,
    /// File path or designation digits
    pub value: String,
}

impl fmt::Display for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.keyword, self.value)
    }
}

/// Airfoil section shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SectionRecord")]
pub enum AirfoilSection {
    /// Coordinates loaded from a file
    File {
        /// Path to the coordinate file
        path: PathBuf,
    },
    /// NACA 4- or 5-digit series
    Naca {
        /// Designation digits, e.g. `"0014"`
        designation: String,
    },
}

/// Unchecked serialized form; NACA digits are validated on conversion
#[derive(Deserialize)]
enum SectionRecord {
    File { path: PathBuf },
    Naca { designation: String },
}

impl TryFrom<SectionRecord> for AirfoilSection {
    type Error = AeroError;

    fn try_from(record: SectionRecord) -> Result<Self> {
        match record {
            SectionRecord::File { path } => Ok(AirfoilSection::File { path }),
            SectionRecord::Naca { designation } => AirfoilSection::naca(&designation),
        }
    }
}

impl Default for AirfoilSection {
    fn default() -> Self {
        AirfoilSection::Naca {
            designation: "0014".to_string(),
        }
    }
}

impl AirfoilSection {
    /// Section loaded from a coordinate file
    pub fn file(path: impl AsRef<Path>) -> Self {
        AirfoilSection::File {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// NACA section from its digit designation
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidConfig`] unless the designation is 4 or 5
    /// ASCII digits.
    pub fn naca(designation: &str) -> Result<Self> {
        let designation = designation.trim();
        let digits_only = designation.chars().all(|c| c.is_ascii_digit());
        if !digits_only || !(4..=5).contains(&designation.len()) {
            return Err(AeroError::config(
                "designation",
                format!("NACA designation must be 4 or 5 digits, got '{designation}'"),
            ));
        }
        Ok(AirfoilSection::Naca {
            designation: designation.to_string(),
        })
    }

    /// Key under which profile-drag results are cached
    ///
    /// The file stem for file sections (so `foils/sd7062.dat` and
    /// `sd7062.dat` share an entry) and `NACA xxxx` for NACA sections.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            AirfoilSection::File { path } => path
                .file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned()),
            AirfoilSection::Naca { designation } => format!("NACA {designation}"),
        }
    }

    /// Section descriptor shared by both variants
    #[must_use]
    pub fn descriptor(&self) -> SectionDescriptor {
        match self {
            AirfoilSection::File { path } => SectionDescriptor {
                keyword: "AFILE",
                value: path.display().to_string(),
            },
            AirfoilSection::Naca { designation } => SectionDescriptor {
                keyword: "NACA",
                value: designation.clone(),
            },
        }
    }

    /// Directive that loads this section into a 2-D section solver
    #[must_use]
    pub fn load_command(&self) -> String {
        match self {
            AirfoilSection::File { path } => format!("load {}", path.display()),
            AirfoilSection::Naca { designation } => format!("naca {designation}"),
        }
    }
}

impl fmt::Display for AirfoilSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
