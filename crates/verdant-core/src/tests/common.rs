use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::compiler::error::TemplateSyntaxError;
use crate::compiler::{MarkupCompiler, TemplateCompiler};
use crate::instance::Instance;
use crate::kernel::error::BoxError;
use crate::render::RenderFn;

/// Compiler that counts calls and delegates to [`MarkupCompiler`]
#[derive(Default)]
pub struct CountingCompiler {
    calls: AtomicUsize,
}

impl CountingCompiler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TemplateCompiler for CountingCompiler {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn compile(&self, markup: &str) -> Result<RenderFn, TemplateSyntaxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MarkupCompiler.compile(markup)
    }
}

/// Shared, ordered record of events observed by test callbacks
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: impl Into<String>) {
        self.events.lock().expect("event log poisoned").push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("event log poisoned").clone()
    }

    /// Hook callback that records `label`
    pub fn recorder(
        &self,
        label: &str,
    ) -> impl Fn(&mut Instance) -> Result<(), BoxError> + Send + Sync + 'static {
        let log = self.clone();
        let label = label.to_string();
        move |_vm| {
            log.push(label.clone());
            Ok(())
        }
    }
}
