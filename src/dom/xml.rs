//! XML element model

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.add_attribute(name, value);
        self
    }

    pub fn add_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((name.to_string(), value.into()));
    }

    pub fn add_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    pub fn add_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Direct child elements with the given id attribute
    pub fn element_with_id(&self, id: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.attribute("id") == Some(id))
    }
}

/// A complete XML file
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub public_id: String,
    pub system_id: String,
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn new(public_id: &str, system_id: &str, root: XmlElement) -> Self {
        Self {
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
            root,
        }
    }
}
