//! Toolkit-agnostic renderable surfaces
//!
//! A surface is what a view's render factory produces: a sized, ordered
//! collection of nodes whose mutable state lives in [`Property`] cells. A
//! rendering toolkit adapts nodes to its own widgets and observes their
//! properties; this crate never draws anything itself.
//!
//! Node handles are cheap clones sharing the underlying properties, so a
//! factory can keep a handle it just added and bind to it. The surface also
//! retains the subscriptions its factory creates; dropping the surface
//! detaches every binding wired to it.

use crate::observable::{Property, Subscription};
use teledeck_types::Size;

/// A static or bound line of text.
#[derive(Clone)]
pub struct Label {
    id: String,
    /// Displayed text
    pub text: Property<String>,
}

impl Label {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: Property::new(String::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// An editable text box.
#[derive(Clone)]
pub struct TextField {
    id: String,
    /// Current contents
    pub text: Property<String>,
    /// Whether the control accepts input
    pub enabled: Property<bool>,
}

impl TextField {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: Property::new(String::new()),
            enabled: Property::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A two-state control (button or switch skin is the toolkit's choice).
#[derive(Clone)]
pub struct Toggle {
    id: String,
    /// Caption next to the control
    pub text: Property<String>,
    /// Current state
    pub selected: Property<bool>,
    /// Whether the control accepts input
    pub enabled: Property<bool>,
}

impl Toggle {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            text: Property::new(String::new()),
            selected: Property::new(false),
            enabled: Property::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A continuous-range control.
#[derive(Clone)]
pub struct Slider {
    id: String,
    min: f64,
    max: f64,
    block_increment: f64,
    /// Current position
    pub value: Property<f64>,
    /// Whether the control accepts input
    pub enabled: Property<bool>,
}

impl Slider {
    fn new(id: &str, min: f64, max: f64, block_increment: f64) -> Self {
        Self {
            id: id.to_string(),
            min,
            max,
            block_increment,
            value: Property::new(min),
            enabled: Property::new(true),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn block_increment(&self) -> f64 {
        self.block_increment
    }
}

/// A visual divider with no state.
#[derive(Clone)]
pub struct Separator;

/// One element of a surface, in layout order.
#[derive(Clone)]
pub enum Node {
    Label(Label),
    TextField(TextField),
    Toggle(Toggle),
    Slider(Slider),
    Separator(Separator),
}

/// A renderable surface produced by a view's render factory.
pub struct Surface {
    size: Size,
    nodes: Vec<Node>,
    subscriptions: Vec<Subscription>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("size", &self.size)
            .field("nodes", &self.nodes.len())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Surface {
    /// Create an empty surface for the given grid extent.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            nodes: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Grid extent this surface was built for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Nodes in layout order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Append a label and return a handle to it.
    pub fn add_label(&mut self, id: &str) -> Label {
        let label = Label::new(id);
        self.nodes.push(Node::Label(label.clone()));
        label
    }

    /// Append a text field and return a handle to it.
    pub fn add_text_field(&mut self, id: &str) -> TextField {
        let field = TextField::new(id);
        self.nodes.push(Node::TextField(field.clone()));
        field
    }

    /// Append a toggle and return a handle to it.
    pub fn add_toggle(&mut self, id: &str) -> Toggle {
        let toggle = Toggle::new(id);
        self.nodes.push(Node::Toggle(toggle.clone()));
        toggle
    }

    /// Append a slider over `[min, max]` and return a handle to it.
    pub fn add_slider(&mut self, id: &str, min: f64, max: f64, block_increment: f64) -> Slider {
        let slider = Slider::new(id, min, max, block_increment);
        self.nodes.push(Node::Slider(slider.clone()));
        slider
    }

    /// Append a separator.
    pub fn add_separator(&mut self) {
        self.nodes.push(Node::Separator(Separator));
    }

    /// Keep a binding alive for this surface's lifetime.
    pub fn retain(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Find a label by id.
    pub fn label(&self, id: &str) -> Option<&Label> {
        self.nodes.iter().find_map(|node| match node {
            Node::Label(label) if label.id == id => Some(label),
            _ => None,
        })
    }

    /// Find a text field by id.
    pub fn text_field(&self, id: &str) -> Option<&TextField> {
        self.nodes.iter().find_map(|node| match node {
            Node::TextField(field) if field.id == id => Some(field),
            _ => None,
        })
    }

    /// Find a toggle by id.
    pub fn toggle(&self, id: &str) -> Option<&Toggle> {
        self.nodes.iter().find_map(|node| match node {
            Node::Toggle(toggle) if toggle.id == id => Some(toggle),
            _ => None,
        })
    }

    /// Find a slider by id.
    pub fn slider(&self, id: &str) -> Option<&Slider> {
        self.nodes.iter().find_map(|node| match node {
            Node::Slider(slider) if slider.id == id => Some(slider),
            _ => None,
        })
    }

    /// Enable or disable every input-capable node.
    ///
    /// Labels are unaffected. Views apply this after construction when their
    /// `user_input` flag is off.
    pub fn set_controls_enabled(&mut self, enabled: bool) {
        for node in &self.nodes {
            match node {
                Node::TextField(field) => field.enabled.set(enabled),
                Node::Toggle(toggle) => toggle.enabled.set(enabled),
                Node::Slider(slider) => slider.enabled.set(enabled),
                Node::Label(_) | Node::Separator(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::bind_one_way;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    #[test]
    fn test_nodes_addressable_by_id() {
        let mut surface = Surface::new(size(2, 1));
        let label = surface.add_label("speed");
        label.text.set("Speed: 0.000".to_string());
        surface.add_separator();
        surface.add_slider("speed_slider", -1.0, 1.0, 0.5);

        assert_eq!(surface.nodes().len(), 3);
        assert_eq!(surface.label("speed").unwrap().text.get(), "Speed: 0.000");
        assert!(surface.label("missing").is_none());
        let slider = surface.slider("speed_slider").unwrap();
        assert_eq!(slider.min(), -1.0);
        assert_eq!(slider.max(), 1.0);
        assert_eq!(slider.block_increment(), 0.5);
    }

    #[test]
    fn test_handles_share_state_with_stored_nodes() {
        let mut surface = Surface::new(size(1, 1));
        let field = surface.add_text_field("value");
        field.text.set("abc".to_string());
        assert_eq!(surface.text_field("value").unwrap().text.get(), "abc");
    }

    #[test]
    fn test_set_controls_enabled_skips_labels() {
        let mut surface = Surface::new(size(1, 1));
        surface.add_label("title");
        let toggle = surface.add_toggle("state");
        let slider = surface.add_slider("level", 0.0, 1.0, 0.1);
        assert!(toggle.enabled.get());

        surface.set_controls_enabled(false);
        assert!(!toggle.enabled.get());
        assert!(!slider.enabled.get());
    }

    #[test]
    fn test_dropping_surface_detaches_retained_bindings() {
        let source = Property::new(0_i64);
        let target = Property::new(0_i64);
        {
            let mut surface = Surface::new(size(1, 1));
            surface.retain(bind_one_way(&target, &source));
            source.set(1);
            assert_eq!(target.get(), 1);
        }
        source.set(2);
        assert_eq!(target.get(), 1);
    }
}
