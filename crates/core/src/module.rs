//! GWT module descriptor model
//!
//! A module is described by a `<name>.gwt.xml` file located by package-path
//! convention under the source or resource roots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::scanner::MODULE_EXTENSION;

/// Parsed view of a module descriptor, restricted to the pieces the
/// orchestrator needs: entry points and source packages for staleness
/// checking, rename-to for locating the compiled output.
#[derive(Debug, Clone)]
pub struct GwtModule {
    name: String,
    rename_to: Option<String>,
    entry_points: Vec<String>,
    sources: Vec<String>,
    source_file: Option<PathBuf>,
}

impl GwtModule {
    /// Parse a descriptor. `source_file` is the file the XML was read from,
    /// if any; descriptors without a backing file can never be checked for
    /// freshness.
    pub fn parse(name: &str, xml: &str, source_file: Option<PathBuf>) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)
            .map_err(|e| Error::ModuleError(format!("invalid descriptor for {name}: {e}")))?;
        let root = doc.root_element();
        if root.tag_name().name() != "module" {
            return Err(Error::ModuleError(format!(
                "descriptor for {name} has no <module> root element"
            )));
        }

        let rename_to = root.attribute("rename-to").map(String::from);
        let entry_points = root
            .children()
            .filter(|node| node.has_tag_name("entry-point"))
            .filter_map(|node| node.attribute("class").map(String::from))
            .collect();
        let mut sources: Vec<String> = root
            .children()
            .filter(|node| node.has_tag_name("source"))
            .filter_map(|node| node.attribute("path").map(String::from))
            .collect();
        if sources.is_empty() {
            // GWT falls back to the "client" package when none is declared
            sources.push("client".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            rename_to,
            entry_points,
            sources,
            source_file,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_points(&self) -> &[String] {
        &self.entry_points
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Dotted package prefix of the module name; empty for top-level modules.
    pub fn package(&self) -> &str {
        self.name
            .rfind('.')
            .map(|idx| &self.name[..idx])
            .unwrap_or("")
    }

    /// Path segment the compiled module is published under.
    pub fn path(&self) -> &str {
        self.rename_to.as_deref().unwrap_or(&self.name)
    }

    /// Location of the compiled selector script for this module.
    pub fn output_artifact(&self, output_dir: &Path) -> PathBuf {
        output_dir
            .join(self.path())
            .join(format!("{}.nocache.js", self.path()))
    }
}

/// Relative descriptor path for a dotted module name.
pub fn descriptor_path(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}{MODULE_EXTENSION}",
        name.split('.').collect::<Vec<_>>().join("/")
    ))
}

/// Locate a module descriptor under the given roots.
pub fn find_module_file(name: &str, roots: &[PathBuf]) -> Option<PathBuf> {
    let relative = descriptor_path(name);
    roots
        .iter()
        .map(|root| root.join(&relative))
        .find(|candidate| candidate.is_file())
}

/// Locate, read and parse a module descriptor.
pub fn read_module(name: &str, roots: &[PathBuf]) -> Result<GwtModule> {
    let path = find_module_file(name, roots)
        .ok_or_else(|| Error::ModuleError(format!("descriptor for module {name} not found")))?;
    let xml = fs::read_to_string(&path)?;
    GwtModule::parse(name, &xml, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module rename-to="appwidgetset">
    <inherits name="com.vaadin.DefaultWidgetSet" />
    <entry-point class="com.example.client.AppEntryPoint" />
    <source path="client" />
    <source path="shared" />
</module>"#;

    #[test]
    fn parses_descriptor_elements() {
        let module = GwtModule::parse("com.example.AppWidgetset", DESCRIPTOR, None).unwrap();
        assert_eq!(module.name(), "com.example.AppWidgetset");
        assert_eq!(module.package(), "com.example");
        assert_eq!(module.path(), "appwidgetset");
        assert_eq!(module.entry_points(), ["com.example.client.AppEntryPoint"]);
        assert_eq!(module.sources(), ["client", "shared"]);
        assert!(module.source_file().is_none());
    }

    #[test]
    fn library_module_without_entry_points() {
        let module = GwtModule::parse("a.b.LibWidgetset", "<module/>", None).unwrap();
        assert!(module.entry_points().is_empty());
        assert_eq!(module.path(), "a.b.LibWidgetset");
        assert_eq!(module.sources(), ["client"]);
    }

    #[test]
    fn output_artifact_follows_nocache_convention() {
        let module = GwtModule::parse("com.example.AppWidgetset", DESCRIPTOR, None).unwrap();
        assert_eq!(
            module.output_artifact(Path::new("/out")),
            Path::new("/out/appwidgetset/appwidgetset.nocache.js")
        );
    }

    #[test]
    fn rejects_non_module_documents() {
        assert!(GwtModule::parse("x.Y", "<project/>", None).is_err());
        assert!(GwtModule::parse("x.Y", "not xml", None).is_err());
    }

    #[test]
    fn read_module_locates_descriptor_by_package_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("src/main/java");
        let package_dir = root.join("com/example");
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("AppWidgetset.gwt.xml"), DESCRIPTOR).unwrap();

        let module = read_module("com.example.AppWidgetset", &[root.clone()]).unwrap();
        assert_eq!(
            module.source_file(),
            Some(package_dir.join("AppWidgetset.gwt.xml").as_path())
        );

        assert!(read_module("com.example.Missing", &[root]).is_err());
    }
}
