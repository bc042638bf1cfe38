use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::chrome::{PageChrome, RegionStyle};
use crate::darkmode::ColorAdjustment;

// The page marks the header both ways (theme class on the element, component
// attribute for layout), so either match counts.
const HEADER_SELECTOR: &str = ".md-header, header[data-md-component=header]";
const BADGE_SELECTOR: &str = ".rst-versions.rst-badge";
const CONTAINER_SELECTOR: &str = "div.md-container";
const FOOTER_SELECTOR: &str = "footer.md-footer";

const DARK_READER_STYLE_SELECTOR: &str = "style.darkreader";
const DARK_READER_META_SELECTOR: &str = "meta[name=darkreader]";
const DARK_READER_ROOT_ATTRS: [&str; 2] = ["data-darkreader-mode", "data-darkreader-scheme"];
const DARK_READER_INLINE_ATTR_PREFIX: &str = "data-darkreader-inline-";
const DARK_READER_INLINE_VAR_PREFIX: &str = "--darkreader-inline-";

/// A parsed documentation page. Region lookups run against the live tree, so
/// they see whatever earlier commands wrote.
pub struct DomChrome {
    document: NodeRef,
}

impl DomChrome {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    pub fn serialize(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize page")?;
        Ok(String::from_utf8(out).context("page not utf-8")?)
    }

    fn select_first(&self, selector: &str) -> Option<DomRegion> {
        self.document.select_first(selector).ok().map(DomRegion)
    }
}

impl PageChrome for DomChrome {
    type Region = DomRegion;

    fn header(&self) -> Option<DomRegion> {
        self.select_first(HEADER_SELECTOR)
    }

    fn version_badge(&self) -> Option<DomRegion> {
        self.select_first(BADGE_SELECTOR)
    }

    fn container(&self) -> Option<DomRegion> {
        self.select_first(CONTAINER_SELECTOR)
    }

    fn footer(&self) -> Option<DomRegion> {
        self.select_first(FOOTER_SELECTOR)
    }
}

impl ColorAdjustment for DomChrome {
    fn is_enabled(&self) -> bool {
        if let Ok(root) = self.document.select_first("html") {
            let attrs = root.attributes.borrow();
            if DARK_READER_ROOT_ATTRS
                .iter()
                .any(|name| attrs.get(*name).is_some())
            {
                return true;
            }
        }
        self.document.select_first(DARK_READER_STYLE_SELECTOR).is_ok()
    }

    fn disable(&mut self) {
        // Root markers.
        if let Ok(root) = self.document.select_first("html") {
            let mut attrs = root.attributes.borrow_mut();
            for name in DARK_READER_ROOT_ATTRS {
                attrs.remove(name);
            }
        }

        // Injected style and meta elements. Collect before detaching:
        // detaching mid-walk ends the traversal early.
        for selector in [DARK_READER_STYLE_SELECTOR, DARK_READER_META_SELECTOR] {
            if let Ok(nodes) = self.document.select(selector) {
                let nodes: Vec<_> = nodes.collect();
                for node in nodes {
                    node.as_node().detach();
                }
            }
        }

        // Per-element annotations: marker attributes plus the custom
        // properties spliced into inline styles.
        if let Ok(nodes) = self.document.select("*") {
            for node in nodes {
                let mut attrs = node.attributes.borrow_mut();

                let markers: Vec<String> = attrs
                    .map
                    .keys()
                    .map(|name| name.local.to_string())
                    .filter(|local| local.starts_with(DARK_READER_INLINE_ATTR_PREFIX))
                    .collect();
                for marker in markers {
                    attrs.remove(marker.as_str());
                }

                let Some(style) = attrs.get("style").map(|s| s.to_string()) else {
                    continue;
                };
                let stripped =
                    strip_declarations_with_prefix(&style, DARK_READER_INLINE_VAR_PREFIX);
                if stripped.is_empty() {
                    attrs.remove("style");
                } else if stripped != style {
                    attrs.insert("style", stripped);
                }
            }
        }
    }
}

/// One element whose inline style the commands patch.
pub struct DomRegion(NodeDataRef<ElementData>);

impl DomRegion {
    fn set_style_property(&self, property: &str, value: &str) {
        let current = self
            .0
            .attributes
            .borrow()
            .get("style")
            .map(|s| s.to_string())
            .unwrap_or_default();
        let updated = upsert_declaration(&current, property, value);
        self.0.attributes.borrow_mut().insert("style", updated);
    }
}

impl RegionStyle for DomRegion {
    fn set_top(&self, value: &str) {
        self.set_style_property("top", value);
    }

    fn set_display(&self, value: &str) {
        self.set_style_property("display", value);
    }

    fn set_background_image(&self, value: &str) {
        self.set_style_property("background-image", value);
    }

    fn set_width_px(&self, width: u32) {
        self.set_style_property("width", &format!("{width}px"));
    }
}

/// Replace or append one declaration in an inline `style` value, leaving the
/// other declarations as written.
fn upsert_declaration(style: &str, property: &str, value: &str) -> String {
    let mut declarations = Vec::new();
    let mut replaced = false;
    for declaration in split_declarations(style) {
        match declaration_property(&declaration) {
            Some(name) if name.eq_ignore_ascii_case(property) => {
                if !replaced {
                    declarations.push(format!("{property}: {value}"));
                    replaced = true;
                }
                // Duplicates collapse into the new declaration.
            }
            _ => declarations.push(declaration),
        }
    }
    if !replaced {
        declarations.push(format!("{property}: {value}"));
    }
    declarations.join("; ")
}

fn strip_declarations_with_prefix(style: &str, prefix: &str) -> String {
    split_declarations(style)
        .into_iter()
        .filter(|declaration| {
            declaration_property(declaration).is_none_or(|name| !name.starts_with(prefix))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn declaration_property(declaration: &str) -> Option<&str> {
    declaration.split_once(':').map(|(name, _)| name.trim())
}

/// Split a style attribute into declarations. `;` separates declarations
/// only outside parentheses and quotes, so data URIs inside `url(...)`
/// survive.
fn split_declarations(style: &str) -> Vec<String> {
    let mut declarations = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in style.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ';' if depth == 0 => declarations.push(std::mem::take(&mut current)),
                _ => current.push(c),
            },
        }
    }
    declarations.push(current);

    declarations
        .into_iter()
        .map(|declaration| declaration.trim().to_string())
        .filter(|declaration| !declaration.is_empty())
        .collect()
}
