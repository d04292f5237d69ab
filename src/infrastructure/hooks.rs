use crate::domain::DateRange;
use anyhow::Result;
use log::warn;

/// Whether a range came from the first click or the closing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Optimistic single-day range from the first click. Callers may treat it
    /// as provisional.
    Provisional,
    /// Range committed by the second click
    Final,
}

/// Context provided to change hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeContext {
    pub range: DateRange,
    pub kind: ChangeKind,
}

/// Trait for plugins that respond to committed selections
pub trait ChangeHook {
    /// Called synchronously on every emitted range
    fn on_change(&self, context: &ChangeContext) -> Result<()>;

    /// Human-readable name for this hook
    fn name(&self) -> &str;
}

/// A hook that returned an error during dispatch
#[derive(Debug)]
pub struct HookFailure {
    pub hook: String,
    pub error: anyhow::Error,
}

/// Registry for managing change hooks
pub struct HookRegistry {
    hooks: Vec<Box<dyn ChangeHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Register a new change hook
    pub fn register<H>(&mut self, hook: H)
    where
        H: ChangeHook + 'static,
    {
        self.hooks.push(Box::new(hook));
    }

    /// Execute all registered hooks, in registration order. A failing hook
    /// does not stop the rest; its error is returned to the caller.
    pub fn execute_change_hooks(&self, context: &ChangeContext) -> Vec<HookFailure> {
        let mut failures = Vec::new();
        for hook in &self.hooks {
            if let Err(error) = hook.on_change(context) {
                warn!("hook '{}' failed: {}", hook.name(), error);
                failures.push(HookFailure {
                    hook: hook.name().to_string(),
                    error,
                });
            }
        }
        failures
    }

    /// List all registered hooks
    pub fn list_hooks(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapts a closure into a hook, for callers that just want an `onChange`.
pub struct FnHook<F> {
    name: String,
    callback: F,
}

impl<F> FnHook<F>
where
    F: Fn(&ChangeContext),
{
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<F> ChangeHook for FnHook<F>
where
    F: Fn(&ChangeContext),
{
    fn on_change(&self, context: &ChangeContext) -> Result<()> {
        (self.callback)(context);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
