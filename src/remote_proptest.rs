//! Property-based tests for reference parsing and local path resolution.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::remote::RemoteReference;
    use proptest::prelude::*;
    use std::path::Path;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9_-]{0,15}"
    }

    fn host() -> impl Strategy<Value = String> {
        "[a-z]{1,10}\\.(com|org|net|io)"
    }

    proptest! {
        /// Property: local_path is deterministic (same reference + root = same path)
        #[test]
        fn local_path_is_deterministic(owner in segment(), name in segment()) {
            let reference = RemoteReference::parse(&format!("{}/{}", owner, name)).unwrap();
            let root = Path::new("/tmp/root");
            prop_assert_eq!(reference.local_path(root), reference.local_path(root));
        }

        /// Property: local_path always lives under root/host
        #[test]
        fn local_path_is_under_root_and_host(
            host in host(),
            segments in prop::collection::vec(segment(), 2..5),
        ) {
            let input = format!("https://{}/{}", host, segments.join("/"));
            let reference = RemoteReference::parse(&input).unwrap();
            let root = Path::new("/srv/src");
            let local = reference.local_path(root);

            prop_assert!(local.starts_with(root.join(&host)));
            prop_assert_eq!(local.components().count(), root.components().count() + 1 + segments.len());
        }

        /// Property: shorthand, https and scp-like forms of one repository share a path
        #[test]
        fn equivalent_forms_share_local_path(owner in segment(), name in segment()) {
            let root = Path::new("/src");
            let shorthand = RemoteReference::parse(&format!("{}/{}", owner, name)).unwrap();
            let https = RemoteReference::parse(&format!("https://github.com/{}/{}", owner, name)).unwrap();
            let scp = RemoteReference::parse(&format!("git@github.com:{}/{}.git", owner, name)).unwrap();

            prop_assert_eq!(shorthand.local_path(root), https.local_path(root));
            prop_assert_eq!(shorthand.local_path(root), scp.local_path(root));
        }

        /// Property: ssh rewriting never changes the local path
        #[test]
        fn ssh_rewrite_keeps_local_path(owner in segment(), name in segment()) {
            let root = Path::new("/src");
            let reference = RemoteReference::parse(&format!("{}/{}", owner, name)).unwrap();
            let ssh = reference.with_ssh().unwrap();

            prop_assert_eq!(ssh.scheme(), "ssh");
            prop_assert_eq!(reference.local_path(root), ssh.local_path(root));
        }

        /// Property: parsing never panics on arbitrary input
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = RemoteReference::parse(&input);
        }

        /// Property: every accepted reference has a host and owner/name
        #[test]
        fn accepted_references_have_host_and_two_segments(input in "[a-z0-9./:@_-]{0,40}") {
            if let Ok(reference) = RemoteReference::parse(&input) {
                prop_assert!(!reference.host().is_empty());
                prop_assert!(reference.path_segments().len() >= 2);
            }
        }

        /// Property: an accepted reference always maps to root/host/owner/.../name
        #[test]
        fn accepted_references_fill_every_layout_level(input in "[a-z0-9./:@_-]{0,40}") {
            if let Ok(reference) = RemoteReference::parse(&input) {
                let root = Path::new("/src");
                let local = reference.local_path(root);
                prop_assert_eq!(
                    local.components().count(),
                    root.components().count() + 1 + reference.path_segments().len()
                );
                prop_assert!(local.file_name().is_some_and(|name| !name.is_empty()));
            }
        }
    }
}
