//! Service Integration Tests
//!
//! Dispatcher, projection query and session against the in-memory fakes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::domain::{
        resolve_package_id, DomainError, MutationIntent, MutationKind, Network, ObjectId,
        PendingTarget, ResolvedPackage,
    };
    use crate::ledger::LedgerError;
    use crate::services::fakes::{FakeLedger, FakeWallet, RecordingObserver};
    use crate::services::{
        DispatchError, ModuleStatus, MutationDispatcher, PendingSlot, Session, TodoQuery,
    };

    struct Harness {
        ledger: Arc<FakeLedger>,
        wallet: Arc<FakeWallet>,
        observer: Arc<RecordingObserver>,
        slot: PendingSlot,
        dispatcher: MutationDispatcher,
    }

    fn package() -> ResolvedPackage {
        resolve_package_id(Some("0x7e57")).unwrap()
    }

    fn harness_with(configure: impl FnOnce(FakeWallet) -> FakeWallet) -> Harness {
        let ledger = Arc::new(FakeLedger::new(package().id));
        let wallet = Arc::new(configure(FakeWallet::new(ledger.clone())));
        let observer = Arc::new(RecordingObserver::default());
        let slot = PendingSlot::new();
        ledger.watch(slot.clone());
        let dispatcher = MutationDispatcher::new(
            wallet.clone(),
            ledger.clone(),
            TodoQuery::new(ledger.clone(), package()),
            package().id,
            slot.clone(),
            observer.clone(),
        );
        Harness {
            ledger,
            wallet,
            observer,
            slot,
            dispatcher,
        }
    }

    fn harness() -> Harness {
        harness_with(|w| w)
    }

    #[tokio::test]
    async fn test_create_reports_loading_then_success_with_new_todo() {
        let h = harness();

        let outcome = h
            .dispatcher
            .dispatch(MutationIntent::Create { text: "Buy milk".to_string() })
            .await
            .expect("create failed");

        assert_eq!(outcome.todos.len(), 1);
        assert_eq!(outcome.todos[0].text, "Buy milk");
        assert!(!outcome.todos[0].done);

        let reports = h.observer.reports();
        assert_eq!(h.observer.phases(), vec!["submitted", "awaiting-finality", "succeeded"]);
        assert_eq!(reports[0].message, "Creating todo...");
        assert_eq!(reports[0].target, PendingTarget::New);
        assert_eq!(reports[2].message, "Todo created!");
        assert_eq!(reports[2].digest.as_deref(), Some(outcome.digest.as_str()));
        assert_eq!(h.slot.current(), None);
    }

    #[tokio::test]
    async fn test_exactly_one_refetch_before_pending_clears() {
        let h = harness();
        let id = h.ledger.insert("Walk dog", false);

        h.dispatcher
            .dispatch(MutationIntent::Toggle { id })
            .await
            .expect("toggle failed");

        assert_eq!(h.ledger.fetches(), 1);
        assert_eq!(h.ledger.pending_at_fetch(), vec![Some(PendingTarget::Existing(id))]);
        assert_eq!(h.slot.current(), None);
        assert!(h.ledger.todos()[0].done);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let h = harness();
        let keep = h.ledger.insert("Keep", false);
        let drop_me = h.ledger.insert("Drop", false);

        let outcome = h
            .dispatcher
            .dispatch(MutationIntent::Update { id: keep, text: "  Kept  ".to_string() })
            .await
            .unwrap();
        assert_eq!(outcome.todos[0].text, "Kept");
        assert!(outcome.todos[0].version > 1);

        let outcome = h.dispatcher.dispatch(MutationIntent::Delete { id: drop_me }).await.unwrap();
        assert_eq!(outcome.todos.len(), 1);
        assert_eq!(outcome.todos[0].id, keep);

        let messages: Vec<_> = h
            .observer
            .reports()
            .into_iter()
            .filter(|r| r.phase == "succeeded")
            .map(|r| r.message)
            .collect();
        assert_eq!(messages, vec!["Todo updated!", "Todo deleted!"]);
    }

    #[tokio::test]
    async fn test_rejected_toggle_leaves_projection_unchanged() {
        let h = harness_with(|w| w.rejecting("User rejected the request"));
        let id = h.ledger.insert("Walk dog", false);

        let err = h.dispatcher.dispatch(MutationIntent::Toggle { id }).await.unwrap_err();

        assert_eq!(
            err,
            DispatchError::Ledger(LedgerError::Wallet("User rejected the request".to_string()))
        );
        assert!(!h.ledger.todos()[0].done);
        assert_eq!(h.slot.current(), None);
        assert_eq!(h.ledger.fetches(), 0);

        let last = h.observer.reports().pop().unwrap();
        assert_eq!(last.phase, "failed");
        assert_eq!(last.kind, MutationKind::Toggle);
        assert!(last.message.starts_with("Toggle failed: "));
        assert!(last.message.contains("User rejected the request"));
    }

    #[tokio::test]
    async fn test_blank_text_is_refused_before_submission() {
        let h = harness();
        let id = h.ledger.insert("Walk dog", false);

        for intent in [
            MutationIntent::Create { text: "   ".to_string() },
            MutationIntent::Update { id, text: "\n\t".to_string() },
        ] {
            let err = h.dispatcher.dispatch(intent).await.unwrap_err();
            assert!(matches!(err, DispatchError::Invalid(DomainError::InvalidInput(_))));
        }

        assert_eq!(h.wallet.calls(), 0);
        assert!(h.observer.reports().is_empty());
        assert_eq!(h.slot.current(), None);
    }

    #[tokio::test]
    async fn test_second_mutation_is_busy_while_first_is_in_flight() {
        let gate = Arc::new(Notify::new());
        let h = harness_with(|w| w.gated(gate.clone()));
        let first_id = h.ledger.insert("First", false);
        let second_id = h.ledger.insert("Second", false);

        let dispatcher = h.dispatcher.clone();
        let first = tokio::spawn(async move {
            dispatcher.dispatch(MutationIntent::Toggle { id: first_id }).await
        });
        while h.wallet.calls() == 0 {
            tokio::task::yield_now().await;
        }

        let err = h
            .dispatcher
            .dispatch(MutationIntent::Delete { id: second_id })
            .await
            .unwrap_err();
        assert_eq!(err, DispatchError::Busy(PendingTarget::Existing(first_id)));
        assert_eq!(h.wallet.calls(), 1);

        gate.notify_one();
        first.await.unwrap().expect("first mutation failed");
        assert_eq!(h.slot.current(), None);
        assert_eq!(h.ledger.todos().len(), 2);
    }

    #[tokio::test]
    async fn test_dropped_future_clears_pending_slot() {
        let gate = Arc::new(Notify::new());
        let h = harness_with(|w| w.gated(gate));

        let result = tokio::time::timeout(
            Duration::from_millis(50),
            h.dispatcher.dispatch(MutationIntent::Create { text: "Never".to_string() }),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(h.slot.current(), None);
    }

    #[tokio::test]
    async fn test_finality_timeout_fails_and_clears() {
        let h = harness();
        h.ledger.fail_finality();

        let err = h
            .dispatcher
            .dispatch(MutationIntent::Create { text: "Late".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Ledger(LedgerError::Timeout(_))));
        assert_eq!(h.observer.phases(), vec!["submitted", "awaiting-finality", "failed"]);
        assert_eq!(h.slot.current(), None);
    }

    #[tokio::test]
    async fn test_refetch_failure_fails_the_mutation() {
        let h = harness();
        h.ledger.fail_fetch();

        let err = h
            .dispatcher
            .dispatch(MutationIntent::Create { text: "Offline".to_string() })
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Ledger(LedgerError::Transport(_))));
        assert_eq!(h.ledger.fetches(), 1);
        assert_eq!(h.observer.phases().last(), Some(&"failed"));
        assert_eq!(h.slot.current(), None);
    }

    #[test]
    fn test_busy_reaches_the_ui_as_plain_message() {
        let id = ObjectId::parse("0x1").unwrap();
        let err = DispatchError::Busy(PendingTarget::Existing(id));
        assert_eq!(
            MutationKind::Toggle.failure_message(&err.to_string()),
            "Toggle failed: Another transaction is still pending"
        );
    }

    fn session(ledger: &Arc<FakeLedger>) -> Session {
        Session::new(Network::Testnet, "http://fake", package(), ledger.clone())
    }

    #[tokio::test]
    async fn test_foreign_objects_never_listed() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        ledger.insert("Mine", false);
        ledger.insert_foreign("0x9999::todo::Todo");
        ledger.insert_foreign(&format!("{}::todo::Other", package().id));

        let wallet = Arc::new(FakeWallet::new(ledger.clone()));
        let session = session(&ledger).connected(wallet, Arc::new(RecordingObserver::default()));

        let todos = session.list_todos().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "Mine");
    }

    #[tokio::test]
    async fn test_zero_objects_is_empty_list() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        let wallet = Arc::new(FakeWallet::new(ledger.clone()));
        let session = session(&ledger).connected(wallet, Arc::new(RecordingObserver::default()));

        assert!(session.list_todos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_follows_every_page() {
        let ledger = Arc::new(FakeLedger::with_page_size(package().id, 2));
        for i in 0..5 {
            ledger.insert(&format!("todo {}", i), i % 2 == 0);
        }
        let query = TodoQuery::new(ledger.clone(), package());

        let todos = query.fetch(&crate::services::fakes::address(1)).await.unwrap();

        let texts: Vec<_> = todos.iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["todo 0", "todo 1", "todo 2", "todo 3", "todo 4"]);
        assert_eq!(ledger.fetches(), 3);
    }

    #[tokio::test]
    async fn test_missing_module_still_lists() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        ledger.insert("Still here", false);
        ledger.unpublish_module();
        let wallet = Arc::new(FakeWallet::new(ledger.clone()));
        let session = session(&ledger).connected(wallet, Arc::new(RecordingObserver::default()));

        let status = session.check_module().await;
        assert!(matches!(
            status,
            ModuleStatus::Unavailable { ref reason } if reason.contains("todo")
        ));
        assert_eq!(session.list_todos().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_published_module_is_available() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        assert_eq!(session(&ledger).check_module().await, ModuleStatus::Available);
    }

    #[tokio::test]
    async fn test_disconnected_session() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        ledger.insert("Hidden", false);
        let session = session(&ledger);

        assert!(session.list_todos().await.unwrap().is_empty());
        let err = session
            .dispatch(MutationIntent::Create { text: "x".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Ledger(LedgerError::Wallet(_))));

        let info = session.info();
        assert_eq!(info.address, None);
        assert_eq!(info.network, Network::Testnet);
        assert_eq!(info.package_id, package().id.to_hex());
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let ledger = Arc::new(FakeLedger::new(package().id));
        let wallet = Arc::new(FakeWallet::new(ledger.clone()));
        let connected = session(&ledger).connected(wallet, Arc::new(RecordingObserver::default()));

        let info = connected.info();
        let address = crate::services::fakes::address(1);
        assert_eq!(info.address, Some(address.to_hex()));
        assert_eq!(info.short_address, Some(address.short()));
        assert_eq!(info.pending, None);

        connected
            .dispatch(MutationIntent::Create { text: "Buy milk".to_string() })
            .await
            .unwrap();
        assert_eq!(ledger.todos().len(), 1);

        let disconnected = connected.disconnected();
        assert_eq!(disconnected.address(), None);
        assert_eq!(disconnected.package().id, package().id);
    }
}
