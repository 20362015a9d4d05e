//! Template engine for workflow documents.
//!
//! A template is compiled once into a node tree and rendered once per
//! (target, core) pair.
//!
//! # Syntax
//!
//! - `{{ name }}` - Substitutes the value of variable `name`
//! - `{{ if name }} ... {{ end }}` - Keeps the body when `name` is non-empty
//! - `{{ if name }} ... {{ else }} ... {{ end }}` - Two-way conditional
//!
//! Blocks nest. Substituted values are inserted as-is and never re-scanned
//! for tags.
//!
//! # Error Handling
//!
//! Undefined variables are an error rather than silently rendering as empty
//! strings, so a typo in the template fails loudly.

use std::collections::HashMap;
use std::fmt;

/// Opening delimiter of a template tag.
pub const TAG_OPEN: &str = "{{";

/// Closing delimiter of a template tag.
pub const TAG_CLOSE: &str = "}}";

/// Error type for template compile and render failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    UndefinedVariable { name: String, position: usize },
    /// A `{{` was found without a matching `}}`.
    UnterminatedTag { position: usize },
    /// A tag with nothing inside (`{{ }}`).
    EmptyTag { position: usize },
    /// A tag that is not a variable, `if`, `else` or `end`.
    MalformedTag { tag: String, position: usize },
    /// `{{ else }}` outside an `if` block, or twice in one block.
    UnexpectedElse { position: usize },
    /// `{{ end }}` with no open block.
    UnexpectedEnd { position: usize },
    /// An `if` block that is never closed.
    UnclosedBlock { position: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => write!(
                f,
                "undefined variable '{}' at position {} in template",
                name, position
            ),
            TemplateError::UnterminatedTag { position } => {
                write!(f, "unterminated tag at position {} in template", position)
            }
            TemplateError::EmptyTag { position } => {
                write!(f, "empty tag at position {} in template", position)
            }
            TemplateError::MalformedTag { tag, position } => write!(
                f,
                "malformed tag '{}' at position {} in template",
                tag, position
            ),
            TemplateError::UnexpectedElse { position } => {
                write!(f, "unexpected 'else' at position {} in template", position)
            }
            TemplateError::UnexpectedEnd { position } => {
                write!(f, "unexpected 'end' at position {} in template", position)
            }
            TemplateError::UnclosedBlock { position } => write!(
                f,
                "'if' at position {} in template is never closed",
                position
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Var {
        name: String,
        position: usize,
    },
    If {
        name: String,
        position: usize,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// An `if` block still being compiled.
struct Frame {
    name: String,
    position: usize,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Compile template source into a reusable template.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut cursor = 0;

        while let Some(offset) = source[cursor..].find(TAG_OPEN) {
            let open = cursor + offset;
            if open > cursor {
                push_node(
                    &mut root,
                    &mut stack,
                    Node::Text(source[cursor..open].to_string()),
                );
            }

            let body = open + TAG_OPEN.len();
            let Some(len) = source[body..].find(TAG_CLOSE) else {
                return Err(TemplateError::UnterminatedTag { position: open });
            };
            let tag = source[body..body + len].trim();
            cursor = body + len + TAG_CLOSE.len();

            let mut words = tag.split_whitespace();
            match (words.next(), words.next(), words.next()) {
                (None, _, _) => return Err(TemplateError::EmptyTag { position: open }),
                (Some("if"), Some(name), None) => stack.push(Frame {
                    name: name.to_string(),
                    position: open,
                    then: Vec::new(),
                    otherwise: None,
                }),
                (Some("else"), None, _) => match stack.last_mut() {
                    Some(frame) if frame.otherwise.is_none() => frame.otherwise = Some(Vec::new()),
                    _ => return Err(TemplateError::UnexpectedElse { position: open }),
                },
                (Some("end"), None, _) => {
                    let frame = stack
                        .pop()
                        .ok_or(TemplateError::UnexpectedEnd { position: open })?;
                    let node = Node::If {
                        name: frame.name,
                        position: frame.position,
                        then: frame.then,
                        otherwise: frame.otherwise.unwrap_or_default(),
                    };
                    push_node(&mut root, &mut stack, node);
                }
                (Some(name), None, _) if name != "if" => push_node(
                    &mut root,
                    &mut stack,
                    Node::Var {
                        name: name.to_string(),
                        position: open,
                    },
                ),
                _ => {
                    return Err(TemplateError::MalformedTag {
                        tag: tag.to_string(),
                        position: open,
                    });
                }
            }
        }

        if let Some(frame) = stack.last() {
            return Err(TemplateError::UnclosedBlock {
                position: frame.position,
            });
        }
        if cursor < source.len() {
            root.push(Node::Text(source[cursor..].to_string()));
        }

        Ok(Self { nodes: root })
    }

    /// Render the template with the given variables.
    pub fn render(&self, variables: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        render_nodes(&self.nodes, variables, &mut out)?;
        Ok(out)
    }
}

fn push_node(root: &mut Vec<Node>, stack: &mut [Frame], node: Node) {
    match stack.last_mut() {
        Some(frame) => match frame.otherwise.as_mut() {
            Some(otherwise) => otherwise.push(node),
            None => frame.then.push(node),
        },
        None => root.push(node),
    }
}

fn lookup<'a>(
    variables: &'a HashMap<String, String>,
    name: &str,
    position: usize,
) -> Result<&'a str, TemplateError> {
    variables
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| TemplateError::UndefinedVariable {
            name: name.to_string(),
            position,
        })
}

fn render_nodes(
    nodes: &[Node],
    variables: &HashMap<String, String>,
    out: &mut String,
) -> Result<(), TemplateError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { name, position } => out.push_str(lookup(variables, name, *position)?),
            Node::If {
                name,
                position,
                then,
                otherwise,
            } => {
                let branch = if lookup(variables, name, *position)?.is_empty() {
                    otherwise
                } else {
                    then
                };
                render_nodes(branch, variables, out)?;
            }
        }
    }
    Ok(())
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
