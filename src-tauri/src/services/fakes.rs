//! In-memory ledger and wallet for service tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use super::dispatcher::{PendingSlot, PhaseObserver, PhaseReport};
use crate::domain::{
    CallArg, MoveCall, ObjectId, PendingTarget, SuiAddress, Todo, TransactionDigest, TODO_MODULE,
};
use crate::ledger::{LedgerClient, LedgerError, LedgerResult, NormalizedModule, ObjectPage, Wallet};

pub fn address(n: u8) -> SuiAddress {
    let mut bytes = [0u8; 32];
    bytes[0] = 0xaa;
    bytes[31] = n;
    SuiAddress::new(bytes)
}

pub struct FakeLedger {
    package: ObjectId,
    todos: Mutex<Vec<Todo>>,
    foreign: Mutex<Vec<Value>>,
    next_object: AtomicUsize,
    page_size: usize,
    module_published: AtomicBool,
    fail_finality: AtomicBool,
    fail_fetch: AtomicBool,
    fetches: AtomicUsize,
    watched: Mutex<Option<PendingSlot>>,
    pending_at_fetch: Mutex<Vec<Option<PendingTarget>>>,
}

impl FakeLedger {
    pub fn new(package: ObjectId) -> Self {
        Self::with_page_size(package, 50)
    }

    pub fn with_page_size(package: ObjectId, page_size: usize) -> Self {
        Self {
            package,
            todos: Mutex::new(Vec::new()),
            foreign: Mutex::new(Vec::new()),
            next_object: AtomicUsize::new(1),
            page_size,
            module_published: AtomicBool::new(true),
            fail_finality: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            watched: Mutex::new(None),
            pending_at_fetch: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, text: &str, done: bool) -> ObjectId {
        let id = self.fresh_id();
        self.todos.lock().unwrap().push(Todo {
            id,
            text: text.to_string(),
            done,
            version: 1,
        });
        id
    }

    /// An owned object the projection must ignore
    pub fn insert_foreign(&self, type_str: &str) {
        let id = self.fresh_id();
        self.foreign.lock().unwrap().push(json!({
            "data": {
                "objectId": id.to_hex(),
                "version": "1",
                "content": {
                    "dataType": "moveObject",
                    "type": type_str,
                    "fields": { "text": "not mine", "done": false }
                }
            }
        }));
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }

    pub fn unpublish_module(&self) {
        self.module_published.store(false, Ordering::SeqCst);
    }

    pub fn fail_finality(&self) {
        self.fail_finality.store(true, Ordering::SeqCst);
    }

    pub fn fail_fetch(&self) {
        self.fail_fetch.store(true, Ordering::SeqCst);
    }

    /// Number of `get_owned_objects` calls so far
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Record the slot's content at every fetch
    pub fn watch(&self, slot: PendingSlot) {
        *self.watched.lock().unwrap() = Some(slot);
    }

    pub fn pending_at_fetch(&self) -> Vec<Option<PendingTarget>> {
        self.pending_at_fetch.lock().unwrap().clone()
    }

    fn fresh_id(&self) -> ObjectId {
        let n = self.next_object.fetch_add(1, Ordering::SeqCst);
        let mut bytes = [0u8; 32];
        bytes[0] = 0x70;
        bytes[24..].copy_from_slice(&(n as u64).to_be_bytes());
        SuiAddress::new(bytes)
    }

    fn render(&self, todo: &Todo) -> Value {
        json!({
            "data": {
                "objectId": todo.id.to_hex(),
                "version": todo.version.to_string(),
                "content": {
                    "dataType": "moveObject",
                    "type": format!("{}::todo::Todo", self.package.to_hex()),
                    "fields": {
                        "id": { "id": todo.id.to_hex() },
                        "text": todo.text,
                        "done": todo.done
                    }
                }
            }
        })
    }

    /// Execute a Move call against the stored todos
    pub fn apply(&self, call: &MoveCall) -> LedgerResult<TransactionDigest> {
        if call.package != self.package || call.module != TODO_MODULE {
            return Err(LedgerError::Execution(format!("no function {}", call.target())));
        }
        let mut todos = self.todos.lock().unwrap();
        let object = call.arguments.iter().find_map(|a| match a {
            CallArg::Object(id) => Some(*id),
            _ => None,
        });
        let text = call.arguments.iter().find_map(|a| match a {
            CallArg::Pure(s) => Some(s.clone()),
            _ => None,
        });
        let position = object.and_then(|id| todos.iter().position(|t| t.id == id));

        match (call.function, position, text) {
            ("create_todo", _, Some(text)) => {
                drop(todos);
                let id = self.fresh_id();
                self.todos.lock().unwrap().push(Todo { id, text, done: false, version: 1 });
            }
            ("toggle_done", Some(i), _) => {
                todos[i].done = !todos[i].done;
                todos[i].version += 1;
            }
            ("update_text", Some(i), Some(text)) => {
                todos[i].text = text;
                todos[i].version += 1;
            }
            ("delete_todo", Some(i), _) => {
                todos.remove(i);
            }
            _ => return Err(LedgerError::Execution("MoveAbort: object not found".to_string())),
        }
        let n = self.next_object.fetch_add(1, Ordering::SeqCst);
        Ok(TransactionDigest::new(format!("digest-{}", n)))
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn get_owned_objects(
        &self,
        _owner: &SuiAddress,
        struct_type: &str,
        cursor: Option<&str>,
    ) -> LedgerResult<ObjectPage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(slot) = self.watched.lock().unwrap().as_ref() {
            self.pending_at_fetch.lock().unwrap().push(slot.current());
        }
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("connection reset".to_string()));
        }

        // The node filters by type; foreign objects slip through to exercise the projection
        let mut all: Vec<Value> = self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|_| struct_type.ends_with("::todo::Todo"))
            .map(|t| self.render(t))
            .collect();
        all.extend(self.foreign.lock().unwrap().iter().cloned());

        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(all.len());
        let has_next_page = end < all.len();
        Ok(ObjectPage {
            data: all[start..end].to_vec(),
            next_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }

    async fn get_normalized_module(
        &self,
        package: &ObjectId,
        module: &str,
    ) -> LedgerResult<NormalizedModule> {
        if *package != self.package
            || module != TODO_MODULE
            || !self.module_published.load(Ordering::SeqCst)
        {
            return Err(LedgerError::Rpc {
                code: -32602,
                message: "Package object does not exist".to_string(),
            });
        }
        let mut normalized = NormalizedModule {
            name: TODO_MODULE.to_string(),
            ..Default::default()
        };
        for name in ["create_todo", "toggle_done", "update_text", "delete_todo"] {
            normalized.exposed_functions.insert(name.to_string(), json!({}));
        }
        Ok(normalized)
    }

    async fn wait_for_transaction(&self, digest: &TransactionDigest) -> LedgerResult<()> {
        if self.fail_finality.load(Ordering::SeqCst) {
            return Err(LedgerError::Timeout(format!("transaction {} not final", digest)));
        }
        Ok(())
    }
}

pub struct FakeWallet {
    ledger: Arc<FakeLedger>,
    address: SuiAddress,
    reject: Option<String>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeWallet {
    pub fn new(ledger: Arc<FakeLedger>) -> Self {
        Self {
            ledger,
            address: address(1),
            reject: None,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every signing request is declined with `reason`
    pub fn rejecting(mut self, reason: &str) -> Self {
        self.reject = Some(reason.to_string());
        self
    }

    /// Signing waits until `gate` is notified
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Wallet for FakeWallet {
    fn address(&self) -> SuiAddress {
        self.address
    }

    async fn sign_and_execute(&self, call: &MoveCall) -> LedgerResult<TransactionDigest> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(reason) = &self.reject {
            return Err(LedgerError::Wallet(reason.clone()));
        }
        self.ledger.apply(call)
    }
}

/// Keeps every report for later inspection
#[derive(Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<PhaseReport>>,
}

impl RecordingObserver {
    pub fn reports(&self) -> Vec<PhaseReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<&'static str> {
        self.reports.lock().unwrap().iter().map(|r| r.phase).collect()
    }
}

impl PhaseObserver for RecordingObserver {
    fn on_phase(&self, report: &PhaseReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}
