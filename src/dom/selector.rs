use std::fmt;
use std::str::FromStr;

use crate::dom::node::{Document, NodeId};
use crate::utils::error::TocError;

/// `[name]` or `[name=value]`
#[derive(Debug, Clone, PartialEq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// One compound selector such as `h2.title[data-x]`
#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let tag = match doc.tag_name(node) {
            Some(tag) => tag,
            None => return false,
        };
        if let Some(expected) = &self.tag {
            if expected != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.attr(node, "id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (doc.attr(node, &a.name), &a.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        })
    }
}

/// CSS selector subset: type, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`,
/// the descendant combinator and comma-separated groups
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    source: String,
    /// Each group is a descendant chain, outermost compound first
    groups: Vec<Vec<Compound>>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, TocError> {
        let mut groups = Vec::new();
        for group in split_groups(source)? {
            let chain = group
                .iter()
                .map(|part| parse_compound(part, source))
                .collect::<Result<Vec<_>, _>>()?;
            if chain.is_empty() {
                return Err(TocError::Selector(format!("empty selector group in '{}'", source)));
            }
            groups.push(chain);
        }
        Ok(Selector {
            source: source.trim().to_string(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups.iter().any(|chain| chain_matches(doc, node, chain))
    }

    /// First matching descendant of `scope` in document order
    pub fn query_first(&self, doc: &Document, scope: NodeId) -> Option<NodeId> {
        doc.descendants(scope).into_iter().find(|&n| self.matches(doc, n))
    }

    /// Every matching descendant of `scope` in document order
    pub fn query_all(&self, doc: &Document, scope: NodeId) -> Vec<NodeId> {
        doc.descendants(scope)
            .into_iter()
            .filter(|&n| self.matches(doc, n))
            .collect()
    }
}

impl FromStr for Selector {
    type Err = TocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn chain_matches(doc: &Document, node: NodeId, chain: &[Compound]) -> bool {
    let (last, ancestors) = match chain.split_last() {
        Some(split) => split,
        None => return false,
    };
    if !last.matches(doc, node) {
        return false;
    }

    // Greedy right-to-left walk up the ancestor chain
    let mut remaining = ancestors.iter().rev().peekable();
    let mut current = doc.parent(node);
    while let Some(compound) = remaining.peek() {
        match current {
            Some(ancestor) => {
                if compound.matches(doc, ancestor) {
                    remaining.next();
                }
                current = doc.parent(ancestor);
            }
            None => return false,
        }
    }
    true
}

/// Split into comma groups of whitespace-separated compounds. Commas and
/// whitespace inside `[...]` (quoted or not) belong to the attribute.
fn split_groups(source: &str) -> Result<Vec<Vec<String>>, TocError> {
    let mut groups = Vec::new();
    let mut chain = Vec::new();
    let mut part = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for c in source.chars() {
        if let Some(q) = quote {
            part.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if in_brackets => {
                quote = Some(c);
                part.push(c);
            }
            '[' => {
                in_brackets = true;
                part.push(c);
            }
            ']' => {
                in_brackets = false;
                part.push(c);
            }
            ',' if !in_brackets => {
                if !part.is_empty() {
                    chain.push(std::mem::take(&mut part));
                }
                groups.push(std::mem::take(&mut chain));
            }
            c if c.is_whitespace() && !in_brackets => {
                if !part.is_empty() {
                    chain.push(std::mem::take(&mut part));
                }
            }
            c => part.push(c),
        }
    }

    if quote.is_some() || in_brackets {
        return Err(TocError::Selector(format!("unterminated attribute selector in '{}'", source)));
    }
    if !part.is_empty() {
        chain.push(part);
    }
    groups.push(chain);
    Ok(groups)
}

/// Index of the `]` closing the attribute selector opened at `open`
fn attr_close(chars: &[char], open: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, &c) in chars[open + 1..].iter().enumerate() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, ']') => return Some(open + 1 + offset),
            _ => {}
        }
    }
    None
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(part: &str, source: &str) -> Result<Compound, TocError> {
    let error = |msg: &str| TocError::Selector(format!("{} in '{}'", msg, source));
    let chars: Vec<char> = part.chars().collect();
    let mut compound = Compound::default();
    let mut i = 0;

    let read_ident = |i: &mut usize| -> String {
        let start = *i;
        while *i < chars.len() && is_ident_char(chars[*i]) {
            *i += 1;
        }
        chars[start..*i].iter().collect()
    };

    if i < chars.len() && chars[i] == '*' {
        i += 1;
    } else if i < chars.len() && is_ident_char(chars[i]) {
        compound.tag = Some(read_ident(&mut i).to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let ident = read_ident(&mut i);
                if ident.is_empty() {
                    return Err(error("expected identifier after '#'"));
                }
                compound.id = Some(ident);
            }
            '.' => {
                i += 1;
                let ident = read_ident(&mut i);
                if ident.is_empty() {
                    return Err(error("expected class name after '.'"));
                }
                compound.classes.push(ident);
            }
            '[' => {
                let close = attr_close(&chars, i).ok_or_else(|| error("unterminated attribute selector"))?;
                let body: String = chars[i + 1..close].iter().collect();
                compound.attrs.push(parse_attr(&body).ok_or_else(|| error("invalid attribute selector"))?);
                i = close + 1;
            }
            c => return Err(error(&format!("unexpected character '{}'", c))),
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }
    Some(AttrMatch {
        name: name.to_ascii_lowercase(),
        value,
    })
}
