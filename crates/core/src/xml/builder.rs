//! Indentation-aware XML element writer.

use quick_xml::escape::escape;

use super::error::XmlError;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Builds a pretty-printed XML document line by line.
///
/// Every element opened with [`open_tag`](Self::open_tag) must be closed with
/// a matching [`close_tag`](Self::close_tag); the builder keeps the stack of
/// open names and refuses to close the wrong one. Text content and attribute
/// values are escaped on the way in, never before and never twice.
#[derive(Debug, Clone)]
pub struct XmlBuilder {
    lines: Vec<String>,
    open: Vec<String>,
    indent_unit: String,
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBuilder {
    /// Creates a builder indenting with two spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent("  ")
    }

    /// Creates a builder with a custom indentation unit.
    #[must_use]
    pub fn with_indent(unit: &str) -> Self {
        Self {
            lines: Vec::new(),
            open: Vec::new(),
            indent_unit: unit.to_string(),
        }
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Writes the UTF-8 XML declaration.
    pub fn declaration(&mut self) -> &mut Self {
        self.lines.push(DECLARATION.to_string());
        self
    }

    /// Opens an element and increases the indentation depth.
    pub fn open_tag(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<&mut Self, XmlError> {
        let start = start_tag(name, attrs)?;
        self.push_line(&start);
        self.open.push(name.to_string());
        Ok(self)
    }

    /// Closes the innermost open element, which must be `name`.
    pub fn close_tag(&mut self, name: &str) -> Result<&mut Self, XmlError> {
        match self.open.last() {
            None => return Err(XmlError::NothingToClose(name.to_string())),
            Some(expected) if expected != name => {
                return Err(XmlError::MismatchedClose {
                    expected: expected.clone(),
                    found: name.to_string(),
                });
            }
            Some(_) => {}
        }
        self.open.pop();
        self.push_line(&format!("</{name}>"));
        Ok(self)
    }

    /// Writes `<name>content</name>`, or nothing at all when `content` is
    /// `None`.
    pub fn element(
        &mut self,
        name: &str,
        content: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, XmlError> {
        let start = start_tag(name, attrs)?;
        if let Some(text) = content {
            self.push_line(&format!("{start}{}</{name}>", escape(text)));
        }
        Ok(self)
    }

    /// Writes a mandatory text element.
    pub fn text_element(&mut self, name: &str, content: &str) -> Result<&mut Self, XmlError> {
        self.element(name, Some(content), &[])
    }

    /// Writes the element only when `condition` holds.
    pub fn element_if(
        &mut self,
        condition: bool,
        name: &str,
        content: Option<&str>,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, XmlError> {
        if condition {
            self.element(name, content, attrs)
        } else {
            Ok(self)
        }
    }

    /// Writes an XML comment at the current depth.
    ///
    /// `--` is not allowed inside a comment, so such sequences are split.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        let mut body = text.to_string();
        while body.contains("--") {
            body = body.replace("--", "- -");
        }
        self.push_line(&format!("<!-- {body} -->"));
        self
    }

    /// Inserts a pre-built fragment verbatim, re-indented to the current
    /// depth. Nothing in `fragment` is escaped.
    pub fn raw(&mut self, fragment: &str) -> &mut Self {
        for line in fragment.lines() {
            self.push_line(line);
        }
        self
    }

    /// Joins the emitted lines into the final document.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::UnclosedElements`] if any element is still open.
    pub fn build(self) -> Result<String, XmlError> {
        if !self.open.is_empty() {
            return Err(XmlError::UnclosedElements(self.open));
        }
        Ok(self.lines.join("\n"))
    }

    fn push_line(&mut self, content: &str) {
        let indent = self.indent_unit.repeat(self.open.len());
        self.lines.push(format!("{indent}{content}"));
    }
}

fn start_tag(name: &str, attrs: &[(&str, &str)]) -> Result<String, XmlError> {
    validate_name(name)?;
    let mut tag = format!("<{name}");
    for (key, value) in attrs {
        validate_name(key)?;
        tag.push_str(&format!(" {key}=\"{}\"", escape(*value)));
    }
    tag.push('>');
    Ok(tag)
}

fn validate_name(name: &str) -> Result<(), XmlError> {
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == ':');
    let chars_ok = name
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'));
    if starts_ok && chars_ok {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_string()))
    }
}
