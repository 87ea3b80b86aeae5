use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;

/// Values for one item of a repeating block, keyed by marker name.
pub type BlockItem = HashMap<&'static str, String>;

/// Everything a template can pull from: global scalars and the item lists of
/// repeating blocks.
#[derive(Debug, Default)]
pub struct Scope {
    scalars: HashMap<&'static str, String>,
    blocks: HashMap<&'static str, Vec<BlockItem>>,
}

impl Scope {
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.scalars.insert(name, value.into());
    }

    pub fn set_block(&mut self, name: &'static str, items: Vec<BlockItem>) {
        self.blocks.insert(name, items);
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.scalars.get(name).map(String::as_str)
    }

    pub fn items(&self, name: &str) -> Option<&[BlockItem]> {
        self.blocks.get(name).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Scalar,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
struct Tag<'t> {
    kind: TagKind,
    name: &'t str,
    start: usize,
    end: usize,
}

#[derive(Debug, PartialEq)]
enum Node<'t> {
    Text(&'t str),
    Marker {
        name: &'t str,
        raw: &'t str,
    },
    Block {
        name: &'t str,
        body: Vec<Node<'t>>,
        raw: &'t str,
    },
}

/// A template with every `{{NAME}}`, `{{#NAME}}` and `{{/NAME}}` span located
/// up front.
///
/// Only the first `{{#NAME}}`..`{{/NAME}}` pair of a name becomes a block.
/// Later pairs, orphan tags and block tags nested inside a block body stay
/// literal text. A name first seen nested inside another block counts as
/// used, so a later top-level pair of that name stays literal too. Rendering copies literal spans and resolved values into the
/// output in one pass, so substituted values are never rescanned for markers.
#[derive(Debug)]
pub struct Template<'t> {
    nodes: Vec<Node<'t>>,
}

impl<'t> Template<'t> {
    pub fn parse(source: &'t str) -> Result<Self> {
        let pattern = Regex::new(r"\{\{([#/]?)([A-Za-z][A-Za-z0-9_]*)\}\}")
            .context("failed to compile template tag regex")?;

        let tags = pattern
            .captures_iter(source)
            .filter_map(|c| {
                let whole = c.get(0)?;
                let kind = match c.get(1).map(|m| m.as_str()) {
                    Some("#") => TagKind::Open,
                    Some("/") => TagKind::Close,
                    _ => TagKind::Scalar,
                };
                Some(Tag {
                    kind,
                    name: c.get(2)?.as_str(),
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect::<Vec<Tag<'t>>>();

        Ok(Self {
            nodes: build_nodes(source, &tags),
        })
    }

    pub fn render(&self, scope: &Scope) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Marker { name, raw } => out.push_str(scope.scalar(name).unwrap_or(*raw)),
                Node::Block { name, body, raw } => match scope.items(name) {
                    Some(items) => {
                        let rendered = items
                            .iter()
                            .map(|item| render_body(body, item, scope))
                            .collect::<Vec<String>>();
                        out.push_str(&rendered.join("\n"));
                    }
                    None => out.push_str(raw),
                },
            }
        }
        out
    }
}

fn build_nodes<'t>(source: &'t str, tags: &[Tag<'t>]) -> Vec<Node<'t>> {
    let mut nodes = Vec::new();
    let mut claimed_blocks = HashSet::<&str>::new();
    let mut cursor = 0usize;
    let mut index = 0usize;

    while index < tags.len() {
        let tag = tags[index];
        push_text(&mut nodes, &source[cursor..tag.start]);

        match tag.kind {
            TagKind::Scalar => nodes.push(Node::Marker {
                name: tag.name,
                raw: &source[tag.start..tag.end],
            }),
            TagKind::Open if !claimed_blocks.contains(tag.name) => {
                let close = tags[index + 1..]
                    .iter()
                    .position(|t| t.kind == TagKind::Close && t.name == tag.name)
                    .map(|offset| index + 1 + offset);

                if let Some(close) = close {
                    let close_tag = tags[close];
                    nodes.push(Node::Block {
                        name: tag.name,
                        body: build_body(source, tag.end, close_tag.start, &tags[index + 1..close]),
                        raw: &source[tag.start..close_tag.end],
                    });
                    claimed_blocks.insert(tag.name);
                    // A nested pair is the first occurrence of its name even
                    // though it renders as literal text.
                    claimed_blocks.extend(
                        tags[index + 1..close]
                            .iter()
                            .filter(|t| t.kind == TagKind::Open)
                            .map(|t| t.name),
                    );
                    cursor = close_tag.end;
                    index = close + 1;
                    continue;
                }

                nodes.push(Node::Text(&source[tag.start..tag.end]));
            }
            TagKind::Open | TagKind::Close => {
                nodes.push(Node::Text(&source[tag.start..tag.end]));
            }
        }

        cursor = tag.end;
        index += 1;
    }

    push_text(&mut nodes, &source[cursor..]);
    nodes
}

fn build_body<'t>(source: &'t str, start: usize, end: usize, tags: &[Tag<'t>]) -> Vec<Node<'t>> {
    let mut body = Vec::new();
    let mut cursor = start;

    for tag in tags {
        push_text(&mut body, &source[cursor..tag.start]);
        let raw = &source[tag.start..tag.end];
        if tag.kind == TagKind::Scalar {
            body.push(Node::Marker {
                name: tag.name,
                raw,
            });
        } else {
            body.push(Node::Text(raw));
        }
        cursor = tag.end;
    }

    push_text(&mut body, &source[cursor..end]);
    body
}

fn push_text<'t>(nodes: &mut Vec<Node<'t>>, text: &'t str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
}

fn render_body(body: &[Node<'_>], item: &BlockItem, scope: &Scope) -> String {
    let mut out = String::new();
    for node in body {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Marker { name, raw } => {
                let value = item
                    .get(*name)
                    .map(String::as_str)
                    .or_else(|| scope.scalar(name))
                    .unwrap_or(*raw);
                out.push_str(value);
            }
            Node::Block { raw, .. } => out.push_str(raw),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&'static str, &str)]) -> BlockItem {
        pairs
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect()
    }

    fn render(source: &str, scope: &Scope) -> String {
        Template::parse(source).unwrap().render(scope)
    }

    #[test]
    fn scalars_replace_every_occurrence_and_unknown_markers_stay() {
        let mut scope = Scope::default();
        scope.set("NAME", "Ada");

        assert_eq!(
            render("{{NAME}} and {{NAME}} meet {{OTHER}}", &scope),
            "Ada and Ada meet {{OTHER}}"
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let mut scope = Scope::default();
        scope.set("A", "{{B}}");
        scope.set("B", "boom");

        assert_eq!(render("[{{A}}]", &scope), "[{{B}}]");
    }

    #[test]
    fn empty_block_collapses_to_nothing() {
        let mut scope = Scope::default();
        scope.set_block("EACH", Vec::new());

        assert_eq!(render("a{{#EACH}}<li>{{X}}</li>{{/EACH}}b", &scope), "ab");
    }

    #[test]
    fn block_emits_one_instance_per_item_in_order() {
        let mut scope = Scope::default();
        scope.set("SUFFIX", "!");
        scope.set_block(
            "EACH",
            vec![item(&[("X", "one")]), item(&[("X", "two")]), item(&[("X", "three")])],
        );

        assert_eq!(
            render("{{#EACH}}<li>{{X}}{{SUFFIX}}</li>{{/EACH}}", &scope),
            "<li>one!</li>\n<li>two!</li>\n<li>three!</li>"
        );
    }

    #[test]
    fn item_values_shadow_globals() {
        let mut scope = Scope::default();
        scope.set("X", "global");
        scope.set_block("EACH", vec![item(&[("X", "local")])]);

        assert_eq!(render("{{X}}|{{#EACH}}{{X}}{{/EACH}}", &scope), "global|local");
    }

    #[test]
    fn only_first_block_pair_is_expanded() {
        let mut scope = Scope::default();
        scope.set_block("EACH", vec![item(&[("X", "1")])]);

        assert_eq!(
            render("{{#EACH}}{{X}}{{/EACH}}-{{#EACH}}{{X}}{{/EACH}}", &scope),
            "1-{{#EACH}}{{X}}{{/EACH}}"
        );
    }

    #[test]
    fn nested_block_claims_its_name_for_the_whole_document() {
        let mut scope = Scope::default();
        scope.set_block("OUTER", vec![item(&[])]);
        scope.set_block("INNER", vec![item(&[("X", "1")])]);

        assert_eq!(
            render(
                "{{#OUTER}}{{#INNER}}x{{/INNER}}{{/OUTER}}|{{#INNER}}{{X}}{{/INNER}}",
                &scope
            ),
            "{{#INNER}}x{{/INNER}}|{{#INNER}}{{X}}{{/INNER}}"
        );
    }

    #[test]
    fn unknown_and_unclosed_blocks_stay_literal() {
        let scope = Scope::default();

        assert_eq!(
            render("{{#MISSING}}x{{/MISSING}} {{#OPEN}}y", &scope),
            "{{#MISSING}}x{{/MISSING}} {{#OPEN}}y"
        );
    }
}
