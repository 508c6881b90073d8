use log::trace;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::{SystemTime, UNIX_EPOCH};
use warroom_protocol::{ExplorationEntry, NavigableTool};

/// Oldest entries are dropped past this point; the log exists for AI
/// context continuity, not as an audit trail.
const EXPLORATION_LOG_CAP: usize = 500;

/// Events delivered to subscribers alongside a state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    CurrentToolChanged { tool: NavigableTool },
    ToolContextUpdated { tool: NavigableTool },
    ExplorationLogged { entry: ExplorationEntry },
    Custom { name: String, payload: Value },
}

/// Immutable copy of the shared state handed to each listener.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub current_tool: Option<NavigableTool>,
    pub contexts: HashMap<NavigableTool, Map<String, Value>>,
    pub exploration_log: Vec<ExplorationEntry>,
}

type Listener = Arc<dyn Fn(&StateSnapshot, &StateEvent) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current_tool: Option<NavigableTool>,
    contexts: HashMap<NavigableTool, Map<String, Value>>,
    exploration_log: Vec<ExplorationEntry>,
    listeners: HashMap<u64, Listener>,
    next_listener_id: u64,
}

impl Inner {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            current_tool: self.current_tool,
            contexts: self.contexts.clone(),
            exploration_log: self.exploration_log.clone(),
        }
    }
}

/// Shared pub/sub store for cross-tool context.
///
/// Listeners run synchronously on the dispatching caller, outside the
/// internal lock, so a listener may itself dispatch; the nested dispatch
/// runs to completion before the outer one returns to its caller.
#[derive(Clone, Default)]
pub struct StateManager {
    inner: Arc<Mutex<Inner>>,
}

/// Handle returned by [`StateManager::subscribe`]. Dropping it (or calling
/// [`Subscription::unsubscribe`]) removes the listener.
pub struct Subscription {
    inner: Weak<Mutex<Inner>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Removal happens in Drop.
    }

    fn remove(&self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut inner) = inner.lock() {
                inner.listeners.remove(&self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl StateManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StateSnapshot, &StateEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().expect("state lock");
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.insert(id, Arc::new(listener));
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Notify every subscriber of an event without mutating state. The
    /// update methods below all funnel through here after their mutation.
    pub fn dispatch(&self, event: StateEvent) {
        let (snapshot, listeners) = {
            let inner = self.inner.lock().expect("state lock");
            let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
            (inner.snapshot(), listeners)
        };
        trace!("dispatching state event to {} listeners", listeners.len());
        for listener in listeners {
            listener(&snapshot, &event);
        }
    }

    pub fn set_current_tool(&self, tool: NavigableTool) {
        {
            let mut inner = self.inner.lock().expect("state lock");
            inner.current_tool = Some(tool);
        }
        self.dispatch(StateEvent::CurrentToolChanged { tool });
    }

    /// Shallow-merge `partial` into the tool's context record. Existing
    /// keys not named in `partial` are left alone.
    pub fn update_tool_context(&self, tool: NavigableTool, partial: Map<String, Value>) {
        {
            let mut inner = self.inner.lock().expect("state lock");
            let context = inner.contexts.entry(tool).or_default();
            for (key, value) in partial {
                context.insert(key, value);
            }
        }
        self.dispatch(StateEvent::ToolContextUpdated { tool });
    }

    #[must_use]
    pub fn tool_contexts(&self) -> HashMap<NavigableTool, Map<String, Value>> {
        self.inner.lock().expect("state lock").contexts.clone()
    }

    #[must_use]
    pub fn current_tool(&self) -> Option<NavigableTool> {
        self.inner.lock().expect("state lock").current_tool
    }

    /// Append to the exploration log, stamping the entry at log time.
    pub fn log_exploration(&self, tool: NavigableTool, action: &str, metadata: Option<Value>) {
        let entry = ExplorationEntry {
            tool,
            action: action.to_string(),
            timestamp_unix_ms: unix_now_ms(),
            metadata,
        };
        {
            let mut inner = self.inner.lock().expect("state lock");
            inner.exploration_log.push(entry.clone());
            if inner.exploration_log.len() > EXPLORATION_LOG_CAP {
                let excess = inner.exploration_log.len() - EXPLORATION_LOG_CAP;
                inner.exploration_log.drain(..excess);
            }
        }
        self.dispatch(StateEvent::ExplorationLogged { entry });
    }

    #[must_use]
    pub fn exploration_log(&self) -> Vec<ExplorationEntry> {
        self.inner.lock().expect("state lock").exploration_log.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().expect("state lock").snapshot()
    }
}

fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
