//! Versioned blob format used to persist a championship between requests.
//!
//! The blob is a bincode encoding of [`ChampionshipSnapshot`]. The header
//! fields come first so the version can be checked before the state is
//! decoded.

use bincode::config;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::{
    engine::Championship,
    errors::{ChampionshipResult, SnapshotError},
    models::{ChampionshipId, Variant},
};

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u16 = 1;

/// Upper bound on the size of a blob accepted for decoding (16MB)
const MAX_SNAPSHOT_SIZE: usize = 16 * 1024 * 1024;

/// Serialized form of a championship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionshipSnapshot<'a> {
    pub version: u16,
    pub id: ChampionshipId,
    pub variant: Variant,
    pub state: Cow<'a, Championship>,
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u16,
    #[allow(dead_code)]
    id: ChampionshipId,
    variant: Variant,
}

impl Championship {
    /// Encode the full championship state as an opaque blob
    pub fn to_blob(&self) -> ChampionshipResult<Vec<u8>> {
        let snapshot = ChampionshipSnapshot {
            version: SNAPSHOT_VERSION,
            id: self.id(),
            variant: self.variant(),
            state: Cow::Borrowed(self),
        };
        let bytes = bincode::serde::encode_to_vec(&snapshot, config::standard())
            .map_err(SnapshotError::from)?;
        Ok(bytes)
    }

    /// Decode a blob produced by [`Championship::to_blob`]
    ///
    /// # Errors
    ///
    /// Returns a `Snapshot` error if the blob is truncated or corrupt, was
    /// written by another schema version, or its header disagrees with the
    /// state it carries.
    pub fn from_blob(bytes: &[u8]) -> ChampionshipResult<Self> {
        let decode_config = config::standard().with_limit::<MAX_SNAPSHOT_SIZE>();

        let (header, _): (SnapshotHeader, usize) =
            bincode::serde::decode_from_slice(bytes, decode_config)
                .map_err(SnapshotError::from)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: header.version,
                supported: SNAPSHOT_VERSION,
            }
            .into());
        }

        let (snapshot, _): (ChampionshipSnapshot<'static>, usize) =
            bincode::serde::decode_from_slice(bytes, decode_config)
                .map_err(SnapshotError::from)?;
        let championship = snapshot.state.into_owned();
        if championship.variant() != header.variant {
            return Err(SnapshotError::VariantMismatch {
                expected: header.variant,
                found: championship.variant(),
            }
            .into());
        }
        Ok(championship)
    }

    /// Rebuild a stored championship from its `(id, variant tag, blob)` row
    pub fn restore(id: ChampionshipId, variant_tag: &str, bytes: &[u8]) -> ChampionshipResult<Self> {
        let expected: Variant = variant_tag.parse()?;
        let mut championship = Self::from_blob(bytes)?;
        if championship.variant() != expected {
            return Err(SnapshotError::VariantMismatch {
                expected,
                found: championship.variant(),
            }
            .into());
        }
        championship.set_id(id);
        Ok(championship)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::championship::errors::ChampionshipError;

    fn sample() -> Championship {
        let mut championship = Championship::new(Variant::Swiss);
        championship.set_id(7);
        for name in ["A", "B", "C", "D"] {
            championship.add_player(name, None).unwrap();
        }
        championship.advance_round().unwrap();
        championship.record_result("A", "B", 2, 1).unwrap();
        championship
    }

    #[test]
    fn test_blob_round_trip() {
        let championship = sample();
        let blob = championship.to_blob().unwrap();
        let restored = Championship::from_blob(&blob).unwrap();
        assert_eq!(restored, championship);
        assert_eq!(restored.to_blob().unwrap(), blob);
    }

    #[test]
    fn test_restore_checks_tag() {
        let blob = sample().to_blob().unwrap();

        let restored = Championship::restore(12, "Swiss", &blob).unwrap();
        assert_eq!(restored.id(), 12);

        assert!(matches!(
            Championship::restore(12, "SingleElimination", &blob),
            Err(ChampionshipError::Snapshot(SnapshotError::VariantMismatch { .. }))
        ));
        assert!(matches!(
            Championship::restore(12, "Knockout", &blob),
            Err(ChampionshipError::Snapshot(SnapshotError::UnknownVariant(_)))
        ));
    }

    #[test]
    fn test_rejects_other_versions() {
        let championship = sample();
        let snapshot = ChampionshipSnapshot {
            version: SNAPSHOT_VERSION + 1,
            id: championship.id(),
            variant: championship.variant(),
            state: Cow::Borrowed(&championship),
        };
        let blob = bincode::serde::encode_to_vec(&snapshot, config::standard()).unwrap();

        assert!(matches!(
            Championship::from_blob(&blob),
            Err(ChampionshipError::Snapshot(SnapshotError::UnsupportedVersion {
                found: 2,
                supported: 1
            }))
        ));
    }

    #[test]
    fn test_rejects_truncated_blob() {
        let blob = sample().to_blob().unwrap();
        assert!(matches!(
            Championship::from_blob(&blob[..blob.len() / 2]),
            Err(ChampionshipError::Snapshot(SnapshotError::Decode(_)))
        ));
        assert!(Championship::from_blob(&[]).is_err());
    }
}
