//! AIML 2.0 document parsing.
//!
//! A document is a well-formed XML file with an `<aiml version="2.0">` root
//! whose children are `<category>` elements (optionally grouped under
//! `<topic name="...">` wrappers). Each category carries a `<pattern>`, an
//! optional `<that>`, an optional `<topic>`, and a `<template>`.
//!
//! Parsing here is purely structural. Pattern validation (grammar rules,
//! wildcard limits) happens when the knowledge base compiles each category,
//! so one bad pattern rejects one category rather than the whole file.

use crate::error::AimlError;
use crate::markup::{parse_fragment, serialize, Element, Node};

/// A structurally parsed category, not yet validated or compiled.
#[derive(Debug, Clone)]
pub struct RawCategory {
    /// Inner markup of `<pattern>` (literal `<set>`/`<topic>` refs kept).
    pub pattern: String,
    /// Inner markup of `<that>`, if present.
    pub that: Option<String>,
    /// Inner markup of `<topic>`, if present (or inherited from a wrapper).
    pub topic: Option<String>,
    /// Parsed template body.
    pub template: Vec<Node>,
}

/// A parsed AIML document.
#[derive(Debug, Clone)]
pub struct Document {
    pub version: String,
    pub categories: Vec<RawCategory>,
}

/// Parse a complete AIML document string.
pub fn parse_document(xml: &str) -> Result<Document, AimlError> {
    let nodes = parse_fragment(xml)?;
    let root = nodes
        .iter()
        .find_map(|n| match n {
            Node::Element(el) if el.name == "aiml" => Some(el),
            _ => None,
        })
        .ok_or(AimlError::MissingRoot)?;

    let version = root
        .attr("version")
        .ok_or(AimlError::MissingVersion)?
        .to_string();

    let mut categories = Vec::new();
    collect_categories(root, None, &mut categories)?;
    if categories.is_empty() {
        return Err(AimlError::NoCategories);
    }

    Ok(Document {
        version,
        categories,
    })
}

fn collect_categories(
    parent: &Element,
    inherited_topic: Option<&str>,
    out: &mut Vec<RawCategory>,
) -> Result<(), AimlError> {
    for el in parent.child_elements() {
        match el.name.as_str() {
            "category" => out.push(category_from_element(el, inherited_topic)?),
            "topic" => {
                let name = el.attr("name");
                collect_categories(el, name.or(inherited_topic), out)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Extract `<category>` elements from an already-parsed fragment - the
/// learner hands `<learn>`/`<learnf>` bodies through here.
pub fn categories_from_nodes(nodes: &[Node]) -> Result<Vec<RawCategory>, AimlError> {
    let mut out = Vec::new();
    for node in nodes {
        if let Node::Element(el) = node {
            if el.name == "category" {
                out.push(category_from_element(el, None)?);
            }
        }
    }
    if out.is_empty() {
        return Err(AimlError::NoLearnableCategories);
    }
    Ok(out)
}

fn category_from_element(
    el: &Element,
    inherited_topic: Option<&str>,
) -> Result<RawCategory, AimlError> {
    let pattern = el
        .find_child("pattern")
        .ok_or(AimlError::IncompleteCategory { missing: "pattern" })?;
    let template = el
        .find_child("template")
        .ok_or(AimlError::IncompleteCategory { missing: "template" })?;

    let that = el.find_child("that").map(|c| serialize(&c.children));
    let topic = el
        .find_child("topic")
        .map(|c| serialize(&c.children))
        .or_else(|| inherited_topic.map(str::to_string));

    Ok(RawCategory {
        pattern: serialize(&pattern.children),
        that,
        topic,
        template: template.children.clone(),
    })
}
