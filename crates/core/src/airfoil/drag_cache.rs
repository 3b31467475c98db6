//! Profile-drag lookup and its explicit cache
//!
//! Zero-lift profile drag comes from a [`ProfileDragSource`]. Evaluating a
//! source can be expensive (an external 2-D section solve), so lookups go
//! through a [`ProfileDragCache`] owned by whoever performs them. The cache
//! only grows until it is explicitly invalidated.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::section::AirfoilSection;
use crate::error::{AeroError, Result};

/// Source of zero-lift profile drag coefficients
pub trait ProfileDragSource {
    /// Zero-lift drag coefficient of `section` at the given Reynolds number
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::UnknownAirfoil`] when the source has no data for
    /// the section.
    fn zero_lift_drag(&self, section: &AirfoilSection, reynolds: f64) -> Result<f64>;
}

/// In-memory drag polar table keyed by airfoil identifier
///
/// Each airfoil holds `(reynolds, cd0)` samples sorted by Reynolds number.
/// Lookups interpolate linearly between samples and hold the end values
/// outside the sampled range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabulatedProfileDrag {
    entries: FxHashMap<String, Vec<(f64, f64)>>,
}

impl TabulatedProfileDrag {
    /// Empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample for a section, keeping samples sorted by Reynolds number
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-positive Reynolds
    /// number or a negative or non-finite drag coefficient.
    pub fn insert(&mut self, section: &AirfoilSection, reynolds: f64, cd0: f64) -> Result<()> {
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(AeroError::flight(
                "reynolds",
                format!("must be positive, got {reynolds}"),
            ));
        }
        if !cd0.is_finite() || cd0 < 0.0 {
            return Err(AeroError::flight(
                "cd0",
                format!("must be non-negative, got {cd0}"),
            ));
        }
        let samples = self.entries.entry(section.identifier()).or_default();
        match samples.binary_search_by(|(re, _)| re.total_cmp(&reynolds)) {
            Ok(i) => samples[i].1 = cd0,
            Err(i) => samples.insert(i, (reynolds, cd0)),
        }
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert)
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn with_sample(
        mut self,
        section: &AirfoilSection,
        reynolds: f64,
        cd0: f64,
    ) -> Result<Self> {
        self.insert(section, reynolds, cd0)?;
        Ok(self)
    }

    /// Number of airfoils in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no airfoils
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProfileDragSource for TabulatedProfileDrag {
    fn zero_lift_drag(&self, section: &AirfoilSection, reynolds: f64) -> Result<f64> {
        let identifier = section.identifier();
        let samples = match self.entries.get(&identifier) {
            Some(samples) if !samples.is_empty() => samples,
            _ => return Err(AeroError::UnknownAirfoil { identifier }),
        };

        let upper = samples.partition_point(|(re, _)| *re < reynolds);
        let cd0 = if upper == 0 {
            samples[0].1
        } else if upper == samples.len() {
            samples[samples.len() - 1].1
        } else {
            let (re0, cd_lo) = samples[upper - 1];
            let (re1, cd_hi) = samples[upper];
            let t = (reynolds - re0) / (re1 - re0);
            cd_lo + t * (cd_hi - cd_lo)
        };
        Ok(cd0)
    }
}

/// Memo of zero-lift drag per airfoil at one Reynolds number
#[derive(Debug, Clone)]
pub struct ProfileDragCache<S: ProfileDragSource> {
    source: S,
    reynolds: f64,
    values: FxHashMap<String, f64>,
}

impl<S: ProfileDragSource> ProfileDragCache<S> {
    /// Empty cache in front of `source`, evaluating at `reynolds`
    ///
    /// # Errors
    ///
    /// Returns [`AeroError::InvalidFlightCondition`] for a non-positive or
    /// non-finite Reynolds number.
    pub fn new(source: S, reynolds: f64) -> Result<Self> {
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(AeroError::flight(
                "reynolds",
                format!("must be positive, got {reynolds}"),
            ));
        }
        Ok(Self {
            source,
            reynolds,
            values: FxHashMap::default(),
        })
    }

    /// Zero-lift drag of `section`, asking the source only on a miss
    ///
    /// # Errors
    ///
    /// Propagates the source's error. Failed lookups are not cached.
    pub fn get(&mut self, section: &AirfoilSection) -> Result<f64> {
        let identifier = section.identifier();
        if let Some(cd0) = self.values.get(&identifier) {
            return Ok(*cd0);
        }
        debug!(
            "Profile drag cache miss for '{}' at Re={:.0}",
            identifier, self.reynolds
        );
        let cd0 = self.source.zero_lift_drag(section, self.reynolds)?;
        self.values.insert(identifier, cd0);
        Ok(cd0)
    }

    /// Whether `section` already has a cached value
    #[must_use]
    pub fn contains(&self, section: &AirfoilSection) -> bool {
        self.values.contains_key(&section.identifier())
    }

    /// Number of cached airfoils
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop the cached value for `section`, returning it if present
    pub fn invalidate(&mut self, section: &AirfoilSection) -> Option<f64> {
        self.values.remove(&section.identifier())
    }

    /// Drop every cached value
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Reynolds number the cache evaluates at
    #[must_use]
    pub fn reynolds(&self) -> f64 {
        self.reynolds
    }

    /// The underlying source
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl ProfileDragSource for CountingSource {
        fn zero_lift_drag(&self, section: &AirfoilSection, _reynolds: f64) -> Result<f64> {
            self.calls.set(self.calls.get() + 1);
            match section {
                AirfoilSection::Naca { .. } => Ok(0.008),
                AirfoilSection::File { .. } => Err(AeroError::UnknownAirfoil {
                    identifier: section.identifier(),
                }),
            }
        }
    }

    #[test]
    fn test_table_interpolates_and_clamps() {
        let naca = AirfoilSection::naca("0012").unwrap();
        let table = TabulatedProfileDrag::new()
            .with_sample(&naca, 2e5, 0.010)
            .unwrap()
            .with_sample(&naca, 1e5, 0.014)
            .unwrap();
        assert_relative_eq!(table.zero_lift_drag(&naca, 1.5e5).unwrap(), 0.012);
        assert_relative_eq!(table.zero_lift_drag(&naca, 5e4).unwrap(), 0.014);
        assert_relative_eq!(table.zero_lift_drag(&naca, 1e6).unwrap(), 0.010);
    }

    #[test]
    fn test_table_miss_is_unknown_airfoil() {
        let table = TabulatedProfileDrag::new();
        let err = table
            .zero_lift_drag(&AirfoilSection::file("sd7062.dat"), 1e5)
            .unwrap_err();
        assert_eq!(
            err,
            AeroError::UnknownAirfoil {
                identifier: "sd7062".to_string()
            }
        );
    }

    #[test]
    fn test_cache_hits_skip_the_source() {
        let source = CountingSource {
            calls: Cell::new(0),
        };
        let mut cache = ProfileDragCache::new(source, 1e5).unwrap();
        let naca = AirfoilSection::naca("0014").unwrap();

        assert_eq!(cache.get(&naca).unwrap(), 0.008);
        assert_eq!(cache.get(&naca).unwrap(), 0.008);
        assert_eq!(cache.source().calls.get(), 1);
        assert!(cache.contains(&naca));

        assert_eq!(cache.invalidate(&naca), Some(0.008));
        cache.get(&naca).unwrap();
        assert_eq!(cache.source().calls.get(), 2);
    }

    #[test]
    fn test_cache_does_not_store_errors() {
        let source = CountingSource {
            calls: Cell::new(0),
        };
        let mut cache = ProfileDragCache::new(source, 1e5).unwrap();
        let file = AirfoilSection::file("missing.dat");
        assert!(cache.get(&file).is_err());
        assert!(cache.get(&file).is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.source().calls.get(), 2);
    }

    #[test]
    fn test_cache_rejects_bad_reynolds() {
        assert!(ProfileDragCache::new(TabulatedProfileDrag::new(), 0.0).is_err());
    }
}
