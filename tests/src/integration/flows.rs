//! # Integration Test Flows
//!
//! Router, trusted sender policy and command engine wired together over
//! in-memory preferences and mock device capabilities.
//!
//! ## Flows Tested:
//!
//! 1. **Bootstrap**: an empty allow-list ignores everything, management included
//! 2. **Trust gate**: only listed senders reach the engine
//! 3. **Management over messages**: trusted senders edit the list in-band
//! 4. **Call-back**: primary/fallback dialing and detached speakerphone attempts

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ab_01_trusted_senders::{InMemoryPreferenceStore, TrustedSenderApi, TrustedSenderPolicy};
    use ab_02_command_engine::{
        AudioChannel, CapabilityError, CommandEngine, ExecutionResult, ManualScheduler,
        MockAudioControl, MockCallPlacer,
    };
    use ab_03_inbound_router::{
        CommandAuditStore, DropReason, FixedTimeSource, InboundMessage, InboundRouter,
        InboundRouterApi, ManagementOutcome, RouteOutcome,
    };

    const OWNER: &str = "15550000000";
    const STRANGER: &str = "19998887777";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Device {
        policy: Arc<TrustedSenderPolicy<InMemoryPreferenceStore>>,
        audio: Arc<MockAudioControl>,
        scheduler: Arc<ManualScheduler>,
        primary: Arc<MockCallPlacer>,
        fallback: Arc<MockCallPlacer>,
        audit: Arc<CommandAuditStore<InMemoryPreferenceStore>>,
        router: Arc<InboundRouter>,
    }

    fn device_with(primary: MockCallPlacer, trusted: &[&str]) -> Device {
        let policy = Arc::new(
            TrustedSenderPolicy::open(Arc::new(InMemoryPreferenceStore::new())).unwrap(),
        );
        for sender in trusted {
            policy.add_trusted_sender(sender).unwrap();
        }

        let audio = Arc::new(MockAudioControl::new());
        let scheduler = Arc::new(ManualScheduler::new());
        let primary = Arc::new(primary);
        let fallback = Arc::new(MockCallPlacer::succeeding("dialer"));
        let engine = CommandEngine::new(audio.clone(), scheduler.clone())
            .with_primary_caller(primary.clone())
            .with_fallback_caller(fallback.clone());

        let audit = Arc::new(CommandAuditStore::with_clock(
            Arc::new(InMemoryPreferenceStore::new()),
            Arc::new(FixedTimeSource::new(1_700_000_000_000)),
        ));
        let router = Arc::new(
            InboundRouter::new(policy.clone(), Arc::new(engine)).with_auditor(audit.clone()),
        );

        Device {
            policy,
            audio,
            scheduler,
            primary,
            fallback,
            audit,
            router,
        }
    }

    fn device(trusted: &[&str]) -> Device {
        device_with(MockCallPlacer::succeeding("telecom"), trusted)
    }

    // =============================================================================
    // BOOTSTRAP
    // =============================================================================

    #[tokio::test]
    async fn test_empty_allow_list_ignores_every_message() {
        let d = device(&[]);

        for (sender, body) in [
            (OWNER, "volume 50"),
            (OWNER, "call me back"),
            (OWNER, "trusted add 15550000000"),
            (STRANGER, "trusted list"),
            ("", "volume max"),
        ] {
            let outcome = d.router.route(InboundMessage::new(sender, body)).await;
            assert_eq!(outcome, RouteOutcome::Dropped(DropReason::NoTrustedSenders));
            assert_eq!(outcome.execution_result(), ExecutionResult::Ignored);
        }

        assert!(d.policy.trusted_senders().unwrap().is_empty());
        assert!(d.audio.calls().is_empty());
        assert!(d.primary.attempts().is_empty());
        assert_eq!(d.audit.last().unwrap(), None);
    }

    #[tokio::test]
    async fn test_bootstrap_through_management_interface() {
        let d = device(&[]);
        assert!(d.router.route(InboundMessage::new(OWNER, "volume max")).await.is_dropped());

        // the management interface is the only way in
        assert!(d.policy.add_trusted_sender("+1 (555) 000-0000").unwrap());

        // stored as +15550000000, so the digits-only form is a different sender
        let outcome = d.router.route(InboundMessage::new(OWNER, "volume max")).await;
        assert_eq!(outcome, RouteOutcome::Dropped(DropReason::UntrustedSender));

        let outcome = d
            .router
            .route(InboundMessage::new("+15550000000", "volume max"))
            .await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);
    }

    // =============================================================================
    // TRUST GATE
    // =============================================================================

    #[tokio::test]
    async fn test_trusted_volume_sets_every_channel() {
        let d = device(&[OWNER]);

        let outcome = d.router.route(InboundMessage::new(OWNER, "volume 50")).await;

        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);
        for (channel, max) in [
            (AudioChannel::VoiceCall, 5u32),
            (AudioChannel::Ring, 7),
            (AudioChannel::Media, 15),
        ] {
            let expected = (f64::from(max) * 0.5).round() as u32;
            assert_eq!(d.audio.level(channel), Some(expected), "{channel}");
        }
    }

    #[tokio::test]
    async fn test_untrusted_sender_causes_no_device_calls() {
        let d = device(&[OWNER]);

        for body in ["volume 50", "volume max", "call me back"] {
            let outcome = d.router.route(InboundMessage::new(STRANGER, body)).await;
            assert_eq!(outcome.execution_result(), ExecutionResult::Ignored);
        }

        assert!(d.audio.calls().is_empty());
        assert!(d.primary.attempts().is_empty());
        assert_eq!(d.scheduler.pending(), 0);
        assert_eq!(d.audit.last().unwrap(), None);
    }

    #[tokio::test]
    async fn test_trusted_unrecognized_body_ignored_and_audited() {
        let d = device(&[OWNER]);

        let outcome = d.router.route(InboundMessage::new(OWNER, "volume 101")).await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Ignored);
        assert!(d.audio.calls().is_empty());

        let audit = d.audit.last().unwrap().unwrap();
        assert_eq!(audit.body, "volume 101");
        assert_eq!(audit.result, "IGNORED");
        assert_eq!(audit.timestamp_ms, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_concurrent_messages_all_routed() {
        let d = device(&[OWNER]);

        let mut handles = Vec::new();
        for i in 0..20u32 {
            let router = d.router.clone();
            let (sender, body) = if i % 2 == 0 {
                (OWNER, format!("volume {}", i * 5))
            } else {
                (STRANGER, "volume max".to_string())
            };
            handles.push(tokio::spawn(async move {
                router.route(InboundMessage::new(sender, body)).await
            }));
        }

        let mut executed = 0;
        for handle in handles {
            if handle.await.unwrap().execution_result() == ExecutionResult::Executed {
                executed += 1;
            }
        }
        assert_eq!(executed, 10);
        // three channels per executed command
        assert_eq!(d.audio.set_level_calls().len(), 30);
    }

    // =============================================================================
    // MANAGEMENT OVER MESSAGES
    // =============================================================================

    #[tokio::test]
    async fn test_trusted_sender_manages_list_in_band() {
        let d = device(&[OWNER]);

        let outcome = d
            .router
            .route(InboundMessage::new(OWNER, "TRUSTED ADD 1-999-888-7777"))
            .await;
        assert!(matches!(
            outcome,
            RouteOutcome::Management(ManagementOutcome::Added { changed: true, .. })
        ));

        // the new sender can act immediately
        let outcome = d.router.route(InboundMessage::new(STRANGER, "volume min")).await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);

        let outcome = d
            .router
            .route(InboundMessage::new(STRANGER, "trusted remove 19998887777"))
            .await;
        assert!(matches!(
            outcome,
            RouteOutcome::Management(ManagementOutcome::Removed { changed: true, .. })
        ));

        let outcome = d.router.route(InboundMessage::new(STRANGER, "volume max")).await;
        assert_eq!(outcome, RouteOutcome::Dropped(DropReason::UntrustedSender));
        assert_eq!(d.policy.trusted_senders().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_removing_last_sender_locks_out_messages() {
        let d = device(&[OWNER]);

        d.router
            .route(InboundMessage::new(OWNER, "trusted remove 15550000000"))
            .await;

        let outcome = d.router.route(InboundMessage::new(OWNER, "trusted list")).await;
        assert_eq!(outcome, RouteOutcome::Dropped(DropReason::NoTrustedSenders));
    }

    #[tokio::test]
    async fn test_untrusted_management_leaves_list_unchanged() {
        let d = device(&[OWNER]);

        for body in [
            "trusted add 19998887777",
            "trusted remove 15550000000",
            "trusted list",
        ] {
            let outcome = d.router.route(InboundMessage::new(STRANGER, body)).await;
            assert_eq!(outcome, RouteOutcome::Dropped(DropReason::UntrustedSender));
        }

        let listed = d.policy.trusted_senders().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].as_str(), OWNER);
    }

    // =============================================================================
    // CALL-BACK
    // =============================================================================

    #[tokio::test]
    async fn test_call_back_then_speakerphone() {
        let d = device(&[OWNER]);

        let outcome = d.router.route(InboundMessage::new(OWNER, "call me back")).await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);
        assert_eq!(d.primary.placed()[0].as_str(), OWNER);

        // route returned before any speakerphone attempt ran
        assert_eq!(d.audio.speakerphone_attempts(), 0);
        assert_eq!(d.scheduler.pending(), 3);

        d.scheduler.run_all().await;
        assert_eq!(d.audio.speakerphone_attempts(), 3);
        assert!(d.audio.speakerphone_on());
    }

    #[tokio::test]
    async fn test_call_back_falls_back_when_primary_denied() {
        let d = device_with(
            MockCallPlacer::failing("telecom", CapabilityError::denied("place_call")),
            &[OWNER],
        );

        let outcome = d.router.route(InboundMessage::new(OWNER, "call me back")).await;
        assert_eq!(outcome.execution_result(), ExecutionResult::Executed);
        assert_eq!(d.primary.placed().len(), 0);
        assert_eq!(d.fallback.placed().len(), 1);
        assert_eq!(d.audit.last_result().unwrap().as_deref(), Some("EXECUTED"));
    }
}
