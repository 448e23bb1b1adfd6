//! # Admission Flow
//!
//! Announce and scrape requests through the tracker hook, as the host
//! would issue them.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config, random_infohash, Authority};
    use gate_approval::{AdmissionService, ApprovalHook, TrackerHook};
    use gate_storage::BackendConfig;
    use gate_telemetry::ApprovalMetrics;
    use gate_types::{AnnounceRequest, ScrapeRequest};
    use std::sync::Arc;

    fn hook(
        config: &gate_approval::ApprovalConfig,
    ) -> (ApprovalHook<AdmissionService>, Arc<ApprovalMetrics>) {
        let metrics = Arc::new(ApprovalMetrics::new());
        let service = AdmissionService::from_config(config, Arc::clone(&metrics)).unwrap();
        (ApprovalHook::new(Arc::new(service)), metrics)
    }

    #[tokio::test]
    async fn test_announce_failure_reasons() {
        let authority = Authority::new();
        let denied = random_infohash();
        let unlisted = random_infohash();
        let (hook, _) = hook(&config(&[], &[denied], &[&authority], BackendConfig::Memory));

        let err = hook
            .handle_announce(&AnnounceRequest::new(unlisted))
            .unwrap_err();
        assert_eq!(err.reason(), "unapproved infohash");

        let err = hook
            .handle_announce(&AnnounceRequest::new(unlisted).with_signature("00ff"))
            .unwrap_err();
        assert_eq!(err.reason(), "invalid signature");

        let err = hook
            .handle_announce(&AnnounceRequest::new(denied).with_signature(authority.sign(&denied)))
            .unwrap_err();
        assert_eq!(err.reason(), "unapproved infohash");

        let stranger = Authority::new();
        let err = hook
            .handle_announce(&AnnounceRequest::new(denied).with_signature(stranger.sign(&denied)))
            .unwrap_err();
        assert_eq!(err.reason(), "unapproved infohash");
    }

    #[tokio::test]
    async fn test_promotion_through_hook() {
        let authority = Authority::new();
        let id = random_infohash();
        let (hook, metrics) = hook(&config(&[], &[], &[&authority], BackendConfig::Memory));

        let signed = AnnounceRequest::new(id).with_signature(authority.sign(&id));
        assert!(hook.handle_announce(&signed).is_ok());
        assert!(hook.handle_announce(&AnnounceRequest::new(id)).is_ok());

        assert_eq!(metrics.promotions.get(), 1);
        assert_eq!(metrics.announces_allowed.get(), 2);
        assert_eq!(metrics.announces_received.get(), 2);

        hook.api().shutdown().await.unwrap();
        assert_eq!(metrics.writes_persisted.get(), 1);
    }

    #[tokio::test]
    async fn test_any_trusted_key_promotes() {
        let retired = Authority::new();
        let current = Authority::new();
        let (hook, _) = hook(&config(
            &[],
            &[],
            &[&current, &retired],
            BackendConfig::Disabled,
        ));

        let a = random_infohash();
        let b = random_infohash();
        assert!(hook
            .handle_announce(&AnnounceRequest::new(a).with_signature(current.sign(&a)))
            .is_ok());
        assert!(hook
            .handle_announce(&AnnounceRequest::new(b).with_signature(retired.sign(&b)))
            .is_ok());
    }

    #[tokio::test]
    async fn test_signature_for_other_infohash_rejected() {
        let authority = Authority::new();
        let (hook, metrics) = hook(&config(&[], &[], &[&authority], BackendConfig::Disabled));

        let target = random_infohash();
        let other = random_infohash();
        let request = AnnounceRequest::new(target).with_signature(authority.sign(&other));

        assert_eq!(
            hook.handle_announce(&request).unwrap_err().reason(),
            "invalid signature"
        );
        assert!(!hook.api().store().is_allowed(&target));
        assert_eq!(metrics.signature_failures.get(), 1);
    }

    #[tokio::test]
    async fn test_scrape_bypasses_lists() {
        let denied = random_infohash();
        let (hook, metrics) = hook(&config(&[], &[denied], &[], BackendConfig::Disabled));

        let request = ScrapeRequest {
            info_hashes: vec![denied, random_infohash()],
        };
        assert!(hook.handle_scrape(&request).is_ok());
        assert_eq!(metrics.scrapes.get(), 1);
        assert_eq!(metrics.announces_denylisted.get(), 0);
    }

    #[tokio::test]
    async fn test_invalid_config_is_fatal() {
        let mut bad = config(&[], &[], &[], BackendConfig::Memory);
        bad.allowlist.push("not-an-infohash".into());

        let result = AdmissionService::from_config(&bad, Arc::new(ApprovalMetrics::new()));
        assert!(matches!(
            result,
            Err(gate_approval::ApprovalError::Config(_))
        ));
    }
}
