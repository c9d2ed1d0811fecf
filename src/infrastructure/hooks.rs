use crate::utils::Result;

type Hook = Box<dyn FnMut() -> Result<()> + Send>;

/// Explicit registration point for build-lifecycle callbacks.
///
/// Hooks are registered at process start and drained on fire, so each
/// registered callback runs at most once per registration — there is no
/// ambient shared-flag state between the pre and post phases beyond
/// what the callbacks themselves capture.
#[derive(Default)]
pub struct HookRegistry {
    pre: Vec<Hook>,
    post: Vec<Hook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback to run before the build starts.
    pub fn register_pre<F>(&mut self, hook: F)
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        self.pre.push(Box::new(hook));
    }

    /// Register a callback to run after the build completes.
    pub fn register_post<F>(&mut self, hook: F)
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        self.post.push(Box::new(hook));
    }

    /// Fire and consume all pre-build hooks, in registration order.
    /// The first failing hook aborts the run.
    pub fn fire_pre(&mut self) -> Result<()> {
        for mut hook in self.pre.drain(..) {
            hook()?;
        }
        Ok(())
    }

    /// Fire and consume all post-build hooks, in registration order.
    pub fn fire_post(&mut self) -> Result<()> {
        for mut hook in self.post.drain(..) {
            hook()?;
        }
        Ok(())
    }
}
