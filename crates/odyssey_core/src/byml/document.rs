//! In-memory XML tree.
//!
//! A minimal element tree: tag, ordered attributes, ordered children.
//! Text and comments are dropped during parsing since the scenario format
//! stores everything in attributes.

/// A single XML element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag (e.g., "T160")
    pub tag: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Append an attribute and return the node.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Append a child and return the node.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Get the value of an attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// First child with the given tag whose `key_attr` equals `key`.
    ///
    /// Equivalent to the XPath step `tag[@key_attr='key']`.
    pub fn find_keyed(&self, tag: &str, key_attr: &str, key: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|c| c.tag == tag && c.attr(key_attr) == Some(key))
    }
}

/// A parsed XML document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlDocument {
    /// The single top-level element
    pub root: XmlNode,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlNode {
        XmlNode::new("T193")
            .with_child(XmlNode::new("T210").with_attr("N", "Y").with_attr("V", "2"))
            .with_child(XmlNode::new("T160").with_attr("N", "X").with_attr("V", "wrong tag"))
            .with_child(XmlNode::new("T210").with_attr("N", "X").with_attr("V", "1"))
    }

    #[test]
    fn test_attr_lookup() {
        let node = XmlNode::new("T160").with_attr("N", "Id").with_attr("V", "obj1");

        assert_eq!(node.attr("N"), Some("Id"));
        assert_eq!(node.attr("V"), Some("obj1"));
        assert_eq!(node.attr("missing"), None);
    }

    #[test]
    fn test_find_keyed_matches_tag_and_key() {
        let node = sample();

        let x = node.find_keyed("T210", "N", "X").unwrap();
        assert_eq!(x.attr("V"), Some("1"));

        assert!(node.find_keyed("T210", "N", "Z").is_none());
    }

    #[test]
    fn test_child_returns_first_match() {
        let node = sample();
        assert_eq!(node.child("T210").and_then(|c| c.attr("N")), Some("Y"));
        assert!(node.child("T192").is_none());
    }
}
