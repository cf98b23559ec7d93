//! In-memory metadata document tree and its XML serialization

use super::escape::escape;

/// XML declaration emitted at the top of every document
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: &str = "  ";

/// Which metadata vocabulary a document follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// MODS v3, the rich bibliographic schema
    Mods,
    /// OAI Dublin Core, the simple interoperable schema
    DublinCore,
}

impl Schema {
    pub fn as_str(&self) -> &'static str {
        match self {
            Schema::Mods => "mods",
            Schema::DublinCore => "dc",
        }
    }
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with raw (unescaped) attribute values and text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text node
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.children.push(Node::Text(text.into()));
        element
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    fn has_child_elements(&self) -> bool {
        self.children
            .iter()
            .any(|node| matches!(node, Node::Element(_)))
    }

    fn write_open_tag(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        self.write_open_tag(out);

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        if !self.has_child_elements() {
            out.push('>');
            out.push_str(&escape(&self.text()));
            out.push_str("</");
            out.push_str(&self.name);
            out.push_str(">\n");
            return;
        }

        out.push_str(">\n");
        for node in &self.children {
            match node {
                Node::Element(element) => element.write(out, depth + 1),
                Node::Text(text) => {
                    out.push_str(&INDENT.repeat(depth + 1));
                    out.push_str(&escape(text));
                    out.push('\n');
                }
            }
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

/// A complete metadata document for one record
///
/// Built fresh for every call and serialized straight away; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    schema: Schema,
    root: Element,
}

impl MetadataDocument {
    pub fn new(schema: Schema, root: Element) -> Self {
        Self { schema, root }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Serializes the document as UTF-8 XML text
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        self.root.write(&mut out, 0);
        out
    }

    /// Serialized document as bytes, ready to be written to disk
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}
