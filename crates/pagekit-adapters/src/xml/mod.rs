//! XML schema validation adapter built on `quick-xml`.
//!
//! The schema is compiled once into the set of root elements it declares
//! plus its target namespace; validating a document checks well-formedness,
//! the root element name, and the declared default namespace. `quick-xml`
//! never fetches external DTDs or schemas, so no external resource access
//! can be triggered by hostile documents.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use pagekit_core::application::ports::{XmlError, XmlValidator, XmlValidatorFactory};

/// Compiles `.xsd` files into [`CompiledSchema`] validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidatorFactory;

impl SchemaValidatorFactory {
    pub fn new() -> Self {
        Self
    }
}

impl XmlValidatorFactory for SchemaValidatorFactory {
    fn compile(&self, schema: &Path) -> Result<Box<dyn XmlValidator>, XmlError> {
        debug!(schema = %schema.display(), "compiling schema");
        let raw = fs::read_to_string(schema)?;

        let mut reader = Reader::from_str(&raw);
        let mut depth = 0usize;
        let mut roots = HashSet::new();
        let mut target_namespace = None;

        loop {
            match reader
                .read_event()
                .map_err(|e| XmlError::Schema(format!("{}: {e}", schema.display())))?
            {
                Event::Start(element) => {
                    if depth == 0 {
                        target_namespace = attribute(&element, b"targetNamespace")?;
                    } else if depth == 1 && element.name().local_name().as_ref() == b"element" {
                        if let Some(name) = attribute(&element, b"name")? {
                            roots.insert(name);
                        }
                    }
                    depth += 1;
                }
                Event::Empty(element) => {
                    if depth == 1 && element.name().local_name().as_ref() == b"element" {
                        if let Some(name) = attribute(&element, b"name")? {
                            roots.insert(name);
                        }
                    }
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
        }

        if roots.is_empty() {
            return Err(XmlError::Schema(format!(
                "{} declares no root elements",
                schema.display()
            )));
        }
        Ok(Box::new(CompiledSchema {
            roots,
            target_namespace,
        }))
    }
}

/// The compiled form of one schema, owned by the validation task that uses
/// it. Construction cost is paid once; each `validate` call is a single
/// streaming pass over the document.
#[derive(Debug)]
struct CompiledSchema {
    roots: HashSet<String>,
    target_namespace: Option<String>,
}

impl XmlValidator for CompiledSchema {
    fn validate(&self, document: &Path) -> Result<(), XmlError> {
        let raw = fs::read_to_string(document)?;
        let mut reader = Reader::from_str(&raw);
        let mut root_seen = false;

        loop {
            match reader
                .read_event()
                .map_err(|e| XmlError::Invalid(format!("malformed XML: {e}")))?
            {
                Event::Start(element) | Event::Empty(element) if !root_seen => {
                    root_seen = true;
                    self.check_root(&element)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !root_seen {
            return Err(XmlError::Invalid("document has no root element".into()));
        }
        Ok(())
    }
}

impl CompiledSchema {
    fn check_root(&self, element: &BytesStart<'_>) -> Result<(), XmlError> {
        let name = String::from_utf8_lossy(element.name().local_name().as_ref()).into_owned();
        if !self.roots.contains(&name) {
            return Err(XmlError::Invalid(format!(
                "unexpected root element '{name}'"
            )));
        }
        if let Some(expected) = &self.target_namespace {
            if let Some(declared) = attribute(element, b"xmlns")? {
                if declared != *expected {
                    return Err(XmlError::Invalid(format!(
                        "root namespace '{declared}' does not match schema namespace '{expected}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, XmlError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| XmlError::Invalid(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Invalid(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
