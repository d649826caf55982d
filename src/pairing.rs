//! Correlation of initiator builds with the uploads they produced
//!
//! Each initiator build fans out to two browsers chosen by its
//! `build_speed`. Every (build, browser) entry is then paired with the first
//! uploader build reporting the same browser and revision.

use crate::builds::{BuildRecord, Browser};
use serde_json::Value;
use tracing::{debug, info};

/// An initiator build resolved to a single browser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedBuild<'a> {
    pub build: &'a BuildRecord,
    pub browser: Browser,
}

impl<'a> ExpandedBuild<'a> {
    /// Revision the initiator checked out (`got_revision`)
    pub fn revision(&self) -> Option<&'a Value> {
        self.build
            .properties
            .got_revision
            .as_ref()
            .and_then(|p| p.first())
    }
}

/// An expanded initiator build and its upload, if one exists yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair<'a> {
    pub initiator: ExpandedBuild<'a>,
    pub uploader: Option<&'a BuildRecord>,
}

/// Expand one initiator build; builds without a `build_speed` yield nothing
pub fn expand_build(build: &BuildRecord) -> Vec<ExpandedBuild<'_>> {
    let Some(speed) = build.properties.build_speed.as_ref().and_then(|p| p.first()) else {
        return Vec::new();
    };

    Browser::for_speed(speed)
        .into_iter()
        .map(|browser| ExpandedBuild { build, browser })
        .collect()
}

/// Expand every initiator build, keeping input order
pub fn expand(builds: &[BuildRecord]) -> Vec<ExpandedBuild<'_>> {
    builds.iter().flat_map(expand_build).collect()
}

/// First uploader build with the same browser and revision
///
/// An initiator without `got_revision` never matches.
pub fn find_match<'a>(
    expanded: &ExpandedBuild<'_>,
    uploads: &'a [BuildRecord],
) -> Option<&'a BuildRecord> {
    let Some(revision) = expanded.revision() else {
        debug!(
            "Build {} has no got_revision; leaving it unmatched",
            expanded.build.build_id
        );
        return None;
    };

    uploads.iter().find(|upload| {
        let props = &upload.properties;
        props.browser_name.as_ref().and_then(|p| p.first_str()) == Some(expanded.browser.as_str())
            && props.revision.as_ref().and_then(|p| p.first()) == Some(revision)
    })
}

/// Expand `initiators` and pair each entry with its upload
pub fn pair_builds<'a>(initiators: &'a [BuildRecord], uploads: &'a [BuildRecord]) -> Vec<Pair<'a>> {
    let pairs: Vec<Pair<'a>> = expand(initiators)
        .into_iter()
        .map(|initiator| Pair {
            initiator,
            uploader: find_match(&initiator, uploads),
        })
        .collect();

    info!(
        "Paired {} of {} expanded builds",
        pairs.iter().filter(|p| p.uploader.is_some()).count(),
        pairs.len()
    );
    pairs
}


#[cfg(test)]
mod tests {
    use super::testing::{initiator, upload};
    use super::*;
    use crate::builds::Property;

    fn browsers(expanded: &[ExpandedBuild<'_>]) -> Vec<Browser> {
        expanded.iter().map(|e| e.browser).collect()
    }

    #[test]
    fn fast_build_expands_to_chrome_and_firefox() {
        let build = initiator(1, Some("fast"), Some("abc123"));
        assert_eq!(
            browsers(&expand_build(&build)),
            vec![Browser::Chrome, Browser::Firefox]
        );
    }

    #[test]
    fn other_speed_expands_to_edge_and_safari() {
        let build = initiator(1, Some("anything-else"), Some("abc123"));
        assert_eq!(
            browsers(&expand_build(&build)),
            vec![Browser::Edge, Browser::Safari]
        );
    }

    #[test]
    fn missing_or_empty_speed_is_dropped() {
        assert!(expand_build(&initiator(1, None, Some("abc123"))).is_empty());

        let mut empty = initiator(2, None, Some("abc123"));
        empty.properties.build_speed = Some(Property::new(vec![]));
        assert!(expand_build(&empty).is_empty());
    }

    #[test]
    fn expansion_preserves_order() {
        let builds = vec![
            initiator(1, Some("slow"), None),
            initiator(2, None, None),
            initiator(3, Some("fast"), None),
        ];
        let expanded: Vec<_> = expand(&builds)
            .iter()
            .map(|e| (e.build.build_id, e.browser))
            .collect();

        assert_eq!(
            expanded,
            vec![
                (1, Browser::Edge),
                (1, Browser::Safari),
                (3, Browser::Chrome),
                (3, Browser::Firefox),
            ]
        );
    }

    #[test]
    fn matches_on_browser_and_revision() {
        let build = initiator(10, Some("fast"), Some("abc123"));
        let uploads = vec![upload(20, "chrome", "abc123")];
        let expanded = expand_build(&build);

        assert_eq!(
            find_match(&expanded[0], &uploads).map(|b| b.build_id),
            Some(20)
        );
        // firefox has no upload
        assert!(find_match(&expanded[1], &uploads).is_none());
    }

    #[test]
    fn revision_mismatch_does_not_match() {
        let build = initiator(10, Some("fast"), Some("abc123"));
        let uploads = vec![upload(20, "chrome", "def456")];
        assert!(find_match(&expand_build(&build)[0], &uploads).is_none());
    }

    #[test]
    fn missing_got_revision_never_matches() {
        let build = initiator(10, Some("fast"), None);
        let uploads = vec![upload(20, "chrome", "abc123")];
        assert!(find_match(&expand_build(&build)[0], &uploads).is_none());
    }

    #[test]
    fn upload_without_properties_is_skipped() {
        let build = initiator(10, Some("fast"), Some("abc123"));
        let mut bare = upload(19, "chrome", "abc123");
        bare.properties.revision = None;
        let uploads = vec![bare, upload(20, "chrome", "abc123")];

        assert_eq!(
            find_match(&expand_build(&build)[0], &uploads).map(|b| b.build_id),
            Some(20)
        );
    }

    #[test]
    fn first_match_wins() {
        let build = initiator(10, Some("slow"), Some("abc123"));
        let uploads = vec![
            upload(30, "safari", "abc123"),
            upload(31, "safari", "abc123"),
        ];
        let pairs = pair_builds(std::slice::from_ref(&build), &uploads);

        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].uploader.is_none());
        assert_eq!(pairs[1].uploader.map(|b| b.build_id), Some(30));
    }
}
