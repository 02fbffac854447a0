// File: crates/line-core/src/svg.rs
// Summary: Minimal SVG element tree with ordered attributes and XML serialization.
// Notes:
// - Marker layers are stored live; their circles are produced when the tree
//   is serialized, so hover state shows up without rebuilding the tree.

use std::fmt;

use crate::marker::MarkerLayer;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
    Markers(MarkerLayer),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<MarkerLayer> for Node {
    fn from(layer: MarkerLayer) -> Self {
        Node::Markers(layer)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: Vec::new(), children: Vec::new() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Builder form of `set_attr`.
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class").is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.append(node);
        self
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Concatenated text content of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
                Node::Markers(_) => {}
            }
        }
        out
    }

    /// Descendant elements (depth first, excluding `self`) with `tag` and,
    /// when given, `class`.
    pub fn find_all<'a>(&'a self, tag: &str, class: Option<&str>) -> Vec<&'a Element> {
        let mut out = Vec::new();
        self.collect(tag, class, &mut out);
        out
    }

    fn collect<'a>(&'a self, tag: &str, class: Option<&str>, out: &mut Vec<&'a Element>) {
        for e in self.child_elements() {
            if e.tag == tag && class.map_or(true, |c| e.has_class(c)) {
                out.push(e);
            }
            e.collect(tag, class, out);
        }
    }

    /// Live marker layers anywhere below this element.
    pub fn marker_layers(&self) -> Vec<&MarkerLayer> {
        let mut out = Vec::new();
        for node in &self.children {
            match node {
                Node::Markers(layer) => out.push(layer),
                Node::Element(e) => out.extend(e.marker_layers()),
                Node::Text(_) => {}
            }
        }
        out
    }

    fn write_open(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (k, v) in &self.attrs {
            write!(f, " {}=\"{}\"", k, Escaped(v))?;
        }
        Ok(())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_open(f)?;
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for node in &self.children {
            match node {
                Node::Element(e) => write!(f, "{e}")?,
                Node::Text(t) => write!(f, "{}", Escaped(t))?,
                Node::Markers(layer) => {
                    for m in layer.borrow().iter() {
                        write!(
                            f,
                            "<circle class=\"line\" fill=\"white\" stroke=\"{}\" r=\"{}\" cx=\"{}\" cy=\"{}\"/>",
                            Escaped(layer.stroke()),
                            num(m.r),
                            num(m.cx),
                            num(m.cy),
                        )?;
                    }
                }
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Attribute number text: shortest round-trip form, `NaN`/`Infinity` spelled out.
pub fn num(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_escaping_and_replaced_attrs() {
        let mut g = Element::new("g").attr("class", "tick").attr("opacity", 1);
        g.set_attr("opacity", 0.5);
        let g = g.child(Element::new("text").text("a < b & \"c\""));
        assert_eq!(
            g.to_string(),
            "<g class=\"tick\" opacity=\"0.5\"><text>a &lt; b &amp; &quot;c&quot;</text></g>"
        );
    }

    #[test]
    fn numbers_print_like_attribute_values() {
        assert_eq!(num(3.5), "3.5");
        assert_eq!(num(8.0), "8");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(f64::NAN), "NaN");
    }

    #[test]
    fn find_all_filters_by_class() {
        let root = Element::new("svg")
            .child(Element::new("g").attr("class", "tick").child(Element::new("line")))
            .child(Element::new("g").attr("class", "axis"));
        assert_eq!(root.find_all("g", Some("tick")).len(), 1);
        assert_eq!(root.find_all("g", None).len(), 2);
        assert_eq!(root.find_all("line", None).len(), 1);
    }
}
