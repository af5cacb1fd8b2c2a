//! The declarative view model
//!
//! A view is a reusable widget definition: an identity, the set of data
//! shapes it can display, and one render factory per supported size. Views
//! are populated by an init function at registration time and again each
//! time the catalog creates a fresh instance for display.

use crate::data_source::{none_source, DataSource};
use crate::dispatcher::UiDispatcher;
use crate::surface::Surface;
use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use teledeck_types::{DataType, Size};

/// Everything a render factory needs to build its surface.
pub struct BuildContext {
    /// The data source bound to the view
    pub source: Arc<dyn DataSource>,
    /// The UI-owning thread's dispatcher, for map-key bindings
    pub dispatcher: Arc<UiDispatcher>,
    /// The size the surface is being built for
    pub size: Size,
}

/// Produces a fresh surface for one size variant.
pub type SurfaceFactory = Box<dyn Fn(&BuildContext) -> Surface + Send + Sync>;

/// A declarative widget definition.
///
/// Mutable while an init function populates it; the registry validates it
/// before it becomes selectable. A view under construction may transiently
/// be empty of names, types, or variants.
pub struct View {
    name: String,
    user_input: bool,
    data_types: HashSet<DataType>,
    variants: BTreeMap<Size, SurfaceFactory>,
    preferred_size: Option<Size>,
    source: Arc<dyn DataSource>,
    source_bound: bool,
    instantiated: bool,
    dispatcher: Arc<UiDispatcher>,
}

impl View {
    /// Create an empty view whose bindings marshal through `dispatcher`.
    ///
    /// The source starts as the inert null source until the dashboard binds
    /// a real one with [`View::set_source`].
    pub fn new(dispatcher: Arc<UiDispatcher>) -> Self {
        Self {
            name: String::new(),
            user_input: false,
            data_types: HashSet::new(),
            variants: BTreeMap::new(),
            preferred_size: None,
            source: none_source(&dispatcher),
            source_bound: false,
            instantiated: false,
            dispatcher,
        }
    }

    /// The view's name. Intended to be unique across the registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the view's controls may write back into the bound source.
    ///
    /// Off by default. When off, input nodes on instantiated surfaces are
    /// disabled after construction.
    pub fn user_input(&self) -> bool {
        self.user_input
    }

    pub fn set_user_input(&mut self, user_input: bool) {
        self.user_input = user_input;
    }

    /// Enable user input.
    pub fn enable_user_input(&mut self) {
        self.user_input = true;
    }

    /// The set of data types this view is able to show.
    pub fn data_types(&self) -> &HashSet<DataType> {
        &self.data_types
    }

    /// Declare one accepted data type.
    pub fn accept(&mut self, data_type: DataType) {
        self.data_types.insert(data_type);
    }

    /// Declare several accepted data types.
    pub fn accept_all(&mut self, data_types: impl IntoIterator<Item = DataType>) {
        self.data_types.extend(data_types);
    }

    /// Register the render factory used when the view is `size`.
    ///
    /// The sizes added here are the only supported sizes for this view.
    /// Adding the same size twice replaces the earlier factory.
    pub fn add_variant(
        &mut self,
        size: Size,
        factory: impl Fn(&BuildContext) -> Surface + Send + Sync + 'static,
    ) {
        self.variants.insert(size, Box::new(factory));
    }

    /// Supported sizes in ascending order.
    pub fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.variants.keys().copied()
    }

    /// Whether a variant exists for `size`.
    pub fn has_variant(&self, size: Size) -> bool {
        self.variants.contains_key(&size)
    }

    /// The preferred size: the explicitly set one, or the smallest variant.
    ///
    /// `None` only while no variant has been added, a state the registry
    /// rejects.
    pub fn preferred_size(&self) -> Option<Size> {
        self.preferred_size
            .or_else(|| self.variants.keys().next().copied())
    }

    pub fn set_preferred_size(&mut self, size: Size) {
        self.preferred_size = Some(size);
    }

    /// The data source displayed by this view.
    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Bind the data source. Callable exactly once, before any surface is
    /// instantiated; the dashboard does this right after creating the view.
    pub fn set_source(&mut self, source: Arc<dyn DataSource>) -> Result<()> {
        if self.source_bound {
            bail!("view {:?} already has a data source bound", self.name);
        }
        if self.instantiated {
            bail!(
                "view {:?} has already instantiated a surface; bind the source before rendering",
                self.name
            );
        }
        self.source = source;
        self.source_bound = true;
        Ok(())
    }

    /// Run the render factory for `size`.
    ///
    /// When `user_input` is off, input nodes on the built surface are
    /// disabled before it is returned.
    pub fn instantiate_surface(&mut self, size: Size) -> Result<Surface> {
        let context = BuildContext {
            source: self.source.clone(),
            dispatcher: self.dispatcher.clone(),
            size,
        };
        let mut surface = match self.variants.get(&size) {
            Some(factory) => factory(&context),
            None => bail!("view {:?} has no variant for size {}", self.name, size),
        };
        self.instantiated = true;
        if !self.user_input {
            surface.set_controls_enabled(false);
        }
        Ok(surface)
    }
}

/// Immutable registration-time snapshot of a view.
///
/// Used by the catalog to pick candidate views for a source without touching
/// view internals. The data-type set is copied, so later mutation of a view
/// never shows through.
#[derive(Debug, Clone, Serialize)]
pub struct ViewDescription {
    name: String,
    user_input: bool,
    data_types: HashSet<DataType>,
}

impl ViewDescription {
    pub(crate) fn from_view(view: &View) -> Self {
        Self {
            name: view.name.clone(),
            user_input: view.user_input,
            data_types: view.data_types.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_input(&self) -> bool {
        self.user_input
    }

    pub fn data_types(&self) -> &HashSet<DataType> {
        &self.data_types
    }

    /// Whether the described view can display a source of type `data_type`.
    ///
    /// A view declaring [`DataType::All`] has no restriction. An untyped
    /// source queries with `All` and so matches only restriction-free views.
    pub fn supports(&self, data_type: DataType) -> bool {
        self.data_types.contains(&DataType::All) || self.data_types.contains(&data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teledeck_types::Value;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    fn empty_factory() -> impl Fn(&BuildContext) -> Surface + Send + Sync + 'static {
        |ctx: &BuildContext| Surface::new(ctx.size)
    }

    #[test]
    fn test_preferred_size_defaults_to_smallest_variant() {
        let mut view = View::new(UiDispatcher::new());
        view.add_variant(size(2, 1), empty_factory());
        view.add_variant(size(1, 1), empty_factory());
        view.add_variant(size(3, 2), empty_factory());
        assert_eq!(view.preferred_size(), Some(size(1, 1)));

        view.set_preferred_size(size(3, 2));
        assert_eq!(view.preferred_size(), Some(size(3, 2)));
    }

    #[test]
    fn test_preferred_size_undefined_without_variants() {
        let view = View::new(UiDispatcher::new());
        assert_eq!(view.preferred_size(), None);
    }

    #[test]
    fn test_duplicate_size_last_write_wins() {
        let mut view = View::new(UiDispatcher::new());
        view.add_variant(size(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            surface.add_label("first");
            surface
        });
        view.add_variant(size(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            surface.add_label("second");
            surface
        });
        assert_eq!(view.sizes().count(), 1);

        let surface = view.instantiate_surface(size(1, 1)).unwrap();
        assert!(surface.label("second").is_some());
        assert!(surface.label("first").is_none());
    }

    #[test]
    fn test_variants_iterate_in_ascending_order() {
        let mut view = View::new(UiDispatcher::new());
        view.add_variant(size(3, 2), empty_factory());
        view.add_variant(size(1, 2), empty_factory());
        view.add_variant(size(2, 1), empty_factory());
        let sizes: Vec<Size> = view.sizes().collect();
        assert_eq!(sizes, vec![size(1, 2), size(2, 1), size(3, 2)]);
    }

    #[test]
    fn test_set_source_exactly_once() {
        let dispatcher = UiDispatcher::new();
        let mut view = View::new(dispatcher.clone());
        view.add_variant(size(1, 1), empty_factory());

        assert!(!view.source().active());
        view.set_source(none_source(&dispatcher)).unwrap();
        assert!(view.set_source(none_source(&dispatcher)).is_err());
    }

    #[test]
    fn test_set_source_after_instantiation_fails() {
        let dispatcher = UiDispatcher::new();
        let mut view = View::new(dispatcher.clone());
        view.add_variant(size(1, 1), empty_factory());
        let _surface = view.instantiate_surface(size(1, 1)).unwrap();
        assert!(view.set_source(none_source(&dispatcher)).is_err());
    }

    #[test]
    fn test_instantiate_unknown_size_fails() {
        let mut view = View::new(UiDispatcher::new());
        view.set_name("Text View");
        view.add_variant(size(1, 1), empty_factory());
        let err = view.instantiate_surface(size(4, 4)).unwrap_err();
        assert!(err.to_string().contains("no variant for size 4x4"));
    }

    #[test]
    fn test_instantiation_disables_controls_without_user_input() {
        let mut view = View::new(UiDispatcher::new());
        view.add_variant(size(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            surface.add_toggle("state");
            surface
        });

        let surface = view.instantiate_surface(size(1, 1)).unwrap();
        assert!(!surface.toggle("state").unwrap().enabled.get());

        let mut input_view = View::new(UiDispatcher::new());
        input_view.enable_user_input();
        input_view.add_variant(size(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            surface.add_toggle("state");
            surface
        });
        let surface = input_view.instantiate_surface(size(1, 1)).unwrap();
        assert!(surface.toggle("state").unwrap().enabled.get());
    }

    #[test]
    fn test_factory_sees_bound_source() {
        let dispatcher = UiDispatcher::new();
        let mut view = View::new(dispatcher.clone());
        view.add_variant(size(1, 1), |ctx| {
            let mut surface = Surface::new(ctx.size);
            let label = surface.add_label("value");
            label.text.set(
                ctx.source
                    .value()
                    .get()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
            surface
        });

        struct Fixed {
            cell: crate::SourceCell,
        }
        impl DataSource for Fixed {
            fn name(&self) -> &str {
                "fixed"
            }
            fn data_type(&self) -> DataType {
                DataType::Number
            }
            fn value(&self) -> &crate::SourceCell {
                &self.cell
            }
        }

        let cell = crate::SourceCell::new(dispatcher.clone());
        cell.set(Some(Value::Number(4.5)));
        view.set_source(Arc::new(Fixed { cell })).unwrap();

        let surface = view.instantiate_surface(size(1, 1)).unwrap();
        assert_eq!(surface.label("value").unwrap().text.get(), "4.5");
    }

    #[test]
    fn test_description_snapshot_has_copy_semantics() {
        let mut view = View::new(UiDispatcher::new());
        view.set_name("Text View");
        view.accept(DataType::Text);
        let description = ViewDescription::from_view(&view);

        // Later mutation must not show through the snapshot.
        view.accept(DataType::Number);
        view.set_name("Renamed");
        assert_eq!(description.name(), "Text View");
        assert_eq!(description.data_types().len(), 1);
        assert!(description.supports(DataType::Text));
        assert!(!description.supports(DataType::Number));
    }

    #[test]
    fn test_description_supports_all() {
        let mut view = View::new(UiDispatcher::new());
        view.set_name("Anything");
        view.accept(DataType::All);
        let description = ViewDescription::from_view(&view);
        assert!(description.supports(DataType::MotorController));
        assert!(description.supports(DataType::All));
    }
}
