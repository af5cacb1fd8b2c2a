//! Registry of validated view definitions
//!
//! The registry keeps descriptions paired with init functions rather than
//! live views, so catalog queries never touch view internals and every
//! display gets a fresh instance. It is an explicit object with a documented
//! lifecycle: construct one at startup, register the built-in definitions,
//! read it for the rest of the process. Tests construct their own.

use crate::dispatcher::UiDispatcher;
use crate::error::InvalidViewError;
use crate::view::{View, ViewDescription};
use log::warn;
use std::sync::Arc;
use teledeck_types::DataType;

/// Populates an empty [`View`]; stored so the registry can re-run it per
/// display.
pub type ViewInit = Arc<dyn Fn(&mut View) + Send + Sync>;

/// Process-wide collection of validated view definitions.
pub struct Registry {
    dispatcher: Arc<UiDispatcher>,
    views: Vec<(ViewDescription, ViewInit)>,
}

impl Registry {
    /// Create an empty registry whose views marshal through `dispatcher`.
    pub fn new(dispatcher: Arc<UiDispatcher>) -> Self {
        Self {
            dispatcher,
            views: Vec::new(),
        }
    }

    /// The dispatcher handed to every view this registry creates.
    pub fn dispatcher(&self) -> &Arc<UiDispatcher> {
        &self.dispatcher
    }

    /// Register a view definition, dropping it with a warning if invalid.
    ///
    /// A single malformed definition must not prevent the rest of the
    /// catalog from loading, so the error stops here: it is logged and the
    /// one view is skipped, with no effect on other registrations.
    pub fn register(&mut self, init: impl Fn(&mut View) + Send + Sync + 'static) {
        if let Err(err) = self.try_register(init) {
            warn!("illegal or incomplete view definition: {err}");
        }
    }

    /// Register a composite view definition.
    ///
    /// A composite view displays a source whose value is a flat key-value
    /// namespace, such as a motor controller, a subsystem, or a command.
    /// There are no nested maps; keys like `"a/b/c"` are opaque strings.
    /// Validation is identical to [`Registry::register`].
    pub fn register_composite(&mut self, init: impl Fn(&mut View) + Send + Sync + 'static) {
        self.register(init);
    }

    /// Register a view definition, reporting validation failures.
    ///
    /// Builds a probe view with `init` to validate the definition and take
    /// its description snapshot; the init function itself is what gets
    /// stored.
    pub fn try_register(
        &mut self,
        init: impl Fn(&mut View) + Send + Sync + 'static,
    ) -> Result<(), InvalidViewError> {
        let init: ViewInit = Arc::new(init);
        let mut probe = View::new(self.dispatcher.clone());
        init(&mut probe);
        self.validate(&probe)?;
        self.views.push((ViewDescription::from_view(&probe), init));
        Ok(())
    }

    fn validate(&self, view: &View) -> Result<(), InvalidViewError> {
        if view.name().trim().is_empty() {
            return Err(InvalidViewError::MissingName);
        }
        if self.views.iter().any(|(desc, _)| desc.name() == view.name()) {
            return Err(InvalidViewError::DuplicateName(view.name().to_string()));
        }
        if view.data_types().is_empty() {
            return Err(InvalidViewError::NoDataTypes(view.name().to_string()));
        }
        if view.sizes().next().is_none() {
            return Err(InvalidViewError::NoVariants(view.name().to_string()));
        }
        // Non-empty variants guarantee a preferred size: explicit, or the
        // smallest key.
        if let Some(preferred) = view.preferred_size() {
            if !view.has_variant(preferred) {
                return Err(InvalidViewError::PreferredSizeWithoutVariant {
                    name: view.name().to_string(),
                    size: preferred,
                });
            }
        }
        Ok(())
    }

    /// Create a fresh view from the definition with the given name.
    pub fn create_view(&self, name: &str) -> Option<View> {
        self.views.iter().find_map(|(desc, init)| {
            if desc.name() == name {
                let mut view = View::new(self.dispatcher.clone());
                init(&mut view);
                Some(view)
            } else {
                None
            }
        })
    }

    /// Descriptions of every registered view, in registration order.
    pub fn descriptions(&self) -> impl Iterator<Item = &ViewDescription> {
        self.views.iter().map(|(desc, _)| desc)
    }

    /// Descriptions of the views able to display the given data type.
    ///
    /// The catalog uses this to offer compatible views for a source.
    pub fn views_for_type(&self, data_type: DataType) -> Vec<&ViewDescription> {
        self.descriptions()
            .filter(|desc| desc.supports(data_type))
            .collect()
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no view has been registered.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
