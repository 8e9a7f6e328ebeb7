//! Headless DOM-like node arena.
//!
//! This is the rendering surface shapes draw into: elements with attributes and inline style,
//! text nodes, parent/child links and a tiny selector engine. Node handles are generational, so
//! a handle to a released node never aliases a newer node that reuses its slot.

use std::collections::BTreeMap;

use crate::foundation::error::{ProgressError, ProgressResult};

/// Generational handle to a node of a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Payload of one node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    /// Element node.
    Element(Element),
    /// Text node.
    Text(String),
}

/// Element payload: tag, attributes and inline style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes by name.
    pub attrs: BTreeMap<String, String>,
    /// Inline style properties.
    pub style: BTreeMap<String, String>,
}

#[derive(Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Element tree hosting rendered shapes.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document whose root is a `body` element.
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        doc.root = doc.alloc(NodeData::Element(Element {
            tag: "body".to_owned(),
            ..Element::default()
        }));
        doc
    }

    /// The `body` root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Node {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> ProgressResult<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| stale(id))
    }

    fn element_mut(&mut self, id: NodeId) -> ProgressResult<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(el) => Ok(el),
            NodeData::Text(_) => Err(ProgressError::validation(format!(
                "node {id:?} is a text node, not an element"
            ))),
        }
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Element(Element {
            tag: tag.into(),
            ..Element::default()
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// True while `id` refers to a live (not released) node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Never true: the root is always live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Payload of a live node.
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|n| &n.data)
    }

    /// Element payload, `None` for text or stale handles.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            NodeData::Text(_) => None,
        }
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    /// Attribute value of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name).map(String::as_str)
    }

    /// Set an attribute on an element.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> ProgressResult<()> {
        self.element_mut(id)?.attrs.insert(name.into(), value.into());
        Ok(())
    }

    /// Remove an attribute from an element.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> ProgressResult<()> {
        self.element_mut(id)?.attrs.remove(name);
        Ok(())
    }

    /// Inline style property of an element.
    pub fn style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.element(id)?.style.get(prop).map(String::as_str)
    }

    /// Set an inline style property on an element.
    pub fn set_style(
        &mut self,
        id: NodeId,
        prop: impl Into<String>,
        value: impl Into<String>,
    ) -> ProgressResult<()> {
        self.element_mut(id)?.style.insert(prop.into(), value.into());
        Ok(())
    }

    /// Parent of a node, `None` when detached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children in order; empty for text and stale handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First child, if any.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// True when `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(n) = cur {
            if n == self.root {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    /// Append `child` as the last child of `parent`, moving it out of any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> ProgressResult<()> {
        match self.data(parent) {
            Some(NodeData::Element(_)) => {}
            Some(NodeData::Text(_)) => {
                return Err(ProgressError::validation("text nodes cannot have children"));
            }
            None => return Err(stale(parent)),
        }
        if !self.contains(child) {
            return Err(stale(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(ProgressError::validation(
                "cannot append a node into its own subtree",
            ));
        }
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove `child` from `parent`. Fails when `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> ProgressResult<()> {
        if self.parent(child) != Some(parent) {
            return Err(ProgressError::validation(format!(
                "node {child:?} is not a child of {parent:?}"
            )));
        }
        self.detach(child)
    }

    /// Unlink `id` from its parent; a node without a parent is left as is.
    pub fn detach(&mut self, id: NodeId) -> ProgressResult<()> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|c| *c != id);
        Ok(())
    }

    /// Detach `id` and free its whole subtree. Handles into the subtree become stale.
    pub fn release(&mut self, id: NodeId) -> ProgressResult<()> {
        if id == self.root {
            return Err(ProgressError::validation("the document root cannot be released"));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let slot = &mut self.slots[cur.index as usize];
            if slot.generation != cur.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.children);
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(cur.index);
        }
        Ok(())
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Text(t)) => out.push_str(t),
            Some(NodeData::Element(_)) => {
                for c in self.children(id) {
                    self.collect_text(*c, out);
                }
            }
            None => {}
        }
    }

    /// First connected element matching `selector`, in document order.
    ///
    /// Supported forms: `#id`, `.class` and a bare tag name.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let sel = Selector::parse(selector)?;
        self.preorder(self.root).into_iter().find(|id| self.matches(*id, &sel))
    }

    /// All connected elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.preorder(self.root)
            .into_iter()
            .filter(|id| self.matches(*id, &sel))
            .collect()
    }

    fn preorder(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn matches(&self, id: NodeId, sel: &Selector<'_>) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        match sel {
            Selector::Id(want) => el.attrs.get("id").is_some_and(|v| v.as_str() == *want),
            Selector::Class(want) => el
                .attrs
                .get("class")
                .is_some_and(|v| v.split_whitespace().any(|c| c == *want)),
            Selector::Tag(want) => el.tag.eq_ignore_ascii_case(want),
        }
    }

    /// Serialize `id` and its subtree as markup. Inline style is emitted as a `style` attribute.
    pub fn outer_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out, true);
        out
    }

    /// Like [`Document::outer_markup`] but without inline style, for standalone vector output.
    pub fn vector_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out, false);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String, with_style: bool) {
        match self.data(id) {
            Some(NodeData::Text(t)) => out.push_str(&escape(t)),
            Some(NodeData::Element(el)) => {
                out.push('<');
                out.push_str(&el.tag);
                for (k, v) in &el.attrs {
                    out.push_str(&format!(" {k}=\"{}\"", escape(v)));
                }
                if with_style && !el.style.is_empty() {
                    let css = el
                        .style
                        .iter()
                        .map(|(k, v)| format!("{k}: {v}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    out.push_str(&format!(" style=\"{}\"", escape(&css)));
                }
                let children = self.children(id);
                if children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for c in children {
                    self.write_markup(*c, out, with_style);
                }
                out.push_str(&format!("</{}>", el.tag));
            }
            None => {}
        }
    }
}

enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Tag(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let s = s.trim();
        let sel = if let Some(id) = s.strip_prefix('#') {
            Self::Id(id)
        } else if let Some(class) = s.strip_prefix('.') {
            Self::Class(class)
        } else {
            Self::Tag(s)
        };
        let body = match &sel {
            Self::Id(v) | Self::Class(v) | Self::Tag(v) => *v,
        };
        let valid = !body.is_empty()
            && body
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then_some(sel)
    }
}

fn stale(id: NodeId) -> ProgressError {
    ProgressError::validation(format!("node {id:?} is not part of the document"))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/document.rs"]
mod tests;
