//! Sequential artifact ID allocation.
//!
//! Artifact IDs have the form `{PREFIX}-{NNNN}`: a type prefix (`RFC`, `ADR`,
//! `DECOMP`) and a per-type sequence number, zero-padded to four digits. The
//! padding widens naturally once a sequence passes 9999.
//!
//! The allocator keeps one counter per artifact type and learns existing IDs
//! through [`IdAllocator::register`], so IDs loaded from disk are never
//! handed out again.

use std::collections::HashMap;

use crate::domain::{ArtifactId, ArtifactType};

/// Parses an artifact ID into its type and sequence number.
///
/// Returns `None` when the prefix is unknown or the numeric part is missing
/// or not all digits.
#[must_use]
pub fn parse_id(id: &str) -> Option<(ArtifactType, u32)> {
    let (prefix, number) = id.split_once('-')?;
    let artifact_type = ArtifactType::from_prefix(prefix)?;
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = number.parse().ok()?;
    Some((artifact_type, number))
}

/// Whether `id` is a well-formed artifact ID.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    parse_id(id).is_some()
}

/// Allocates sequential artifact IDs, one counter per artifact type.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_numbers: HashMap<ArtifactType, u32>,
}

impl IdAllocator {
    /// Creates an allocator with every sequence starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an existing ID so future allocations skip past it.
    ///
    /// IDs that do not parse are ignored; they cannot collide with anything
    /// this allocator produces.
    pub fn register(&mut self, id: &ArtifactId) {
        if let Some((artifact_type, number)) = parse_id(id.as_str()) {
            let next = self.next_numbers.entry(artifact_type).or_insert(1);
            if number.saturating_add(1) > *next {
                *next = number.saturating_add(1);
            }
        }
    }

    /// Produces the next ID for `artifact_type` and advances its counter.
    pub fn allocate(&mut self, artifact_type: ArtifactType) -> ArtifactId {
        let next = self.next_numbers.entry(artifact_type).or_insert(1);
        let id = ArtifactId::new(format!("{}-{:04}", artifact_type.prefix(), next));
        *next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_well_formed_ids() {
        assert_eq!(parse_id("RFC-0001"), Some((ArtifactType::Rfc, 1)));
        assert_eq!(parse_id("ADR-0042"), Some((ArtifactType::Adr, 42)));
        assert_eq!(
            parse_id("DECOMP-10000"),
            Some((ArtifactType::Decomposition, 10000))
        );
    }

    #[test]
    fn parse_id_rejects_malformed_ids() {
        assert_eq!(parse_id("RFC"), None);
        assert_eq!(parse_id("RFC-"), None);
        assert_eq!(parse_id("RFC-12a4"), None);
        assert_eq!(parse_id("TASK-0001"), None);
        assert_eq!(parse_id("rfc-0001"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn allocate_produces_sequential_padded_ids() {
        let mut allocator = IdAllocator::new();
        assert_eq!(allocator.allocate(ArtifactType::Rfc).as_str(), "RFC-0001");
        assert_eq!(allocator.allocate(ArtifactType::Rfc).as_str(), "RFC-0002");
        // Counters are independent per type.
        assert_eq!(allocator.allocate(ArtifactType::Adr).as_str(), "ADR-0001");
    }

    #[test]
    fn register_advances_counter_past_existing_ids() {
        let mut allocator = IdAllocator::new();
        allocator.register(&ArtifactId::new("RFC-0007"));
        allocator.register(&ArtifactId::new("RFC-0003"));
        assert_eq!(allocator.allocate(ArtifactType::Rfc).as_str(), "RFC-0008");
    }

    #[test]
    fn register_ignores_unparseable_ids() {
        let mut allocator = IdAllocator::new();
        allocator.register(&ArtifactId::new("not-an-id"));
        assert_eq!(allocator.allocate(ArtifactType::Rfc).as_str(), "RFC-0001");
    }

    #[test]
    fn padding_widens_past_9999() {
        let mut allocator = IdAllocator::new();
        allocator.register(&ArtifactId::new("ADR-9999"));
        assert_eq!(allocator.allocate(ArtifactType::Adr).as_str(), "ADR-10000");
    }

    #[test]
    fn is_valid_id_mirrors_parse() {
        assert!(is_valid_id("RFC-0001"));
        assert!(!is_valid_id("RFC_0001"));
    }
}
