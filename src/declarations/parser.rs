//! Line parser for the declaration file.

use crate::config::{Customs, Groups, make_key};
use crate::error::{Result, UpdateError};

/// Tables populated from a declaration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Group name to comma-joined core list, in file order.
    pub groups: Groups,

    /// Composite key to custom argument string. Later lines win.
    pub customs: Customs,
}

/// What plain lines currently apply to. Changed only by bracket lines.
#[derive(Debug)]
enum ParseState {
    /// No block opened yet.
    Dangling,
    /// Inside `[name]`: lines are core names.
    Group(String),
    /// Inside `[custom: a|b]`: lines are `core arguments`.
    Custom(Vec<String>),
}

/// Parse the contents of a declaration file.
///
/// `file` is only used in error messages.
pub fn parse_declarations(file: &str, content: &str) -> Result<Declarations> {
    let mut declarations = Declarations::default();
    let mut state = ParseState::Dangling;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let err = |message: String| UpdateError::Declaration {
            file: file.to_string(),
            line: line_no,
            message,
        };

        if let Some(rest) = line.strip_prefix('[') {
            let Some(end) = rest.find(']') else {
                return Err(err("malformed expression".to_string()));
            };
            state = open_block(&declarations, rest[..end].trim()).map_err(err)?;
            if let ParseState::Group(name) = &state {
                declarations.groups.insert(name.clone(), String::new());
            }
            continue;
        }

        match &state {
            ParseState::Group(name) => {
                let members = declarations.groups.entry(name.clone()).or_default();
                if !members.is_empty() {
                    members.push(',');
                }
                members.push_str(line);
            }
            ParseState::Custom(targets) => {
                let Some((core, args)) = line.split_once(' ') else {
                    return Err(err("custom command is empty".to_string()));
                };
                let args = args.trim_start();
                for target in targets {
                    let key = make_key(target, core);
                    if declarations.customs.contains_key(&key) {
                        tracing::debug!(%key, line = line_no, "custom arguments overridden");
                    }
                    declarations.customs.insert(key, args.to_string());
                }
            }
            ParseState::Dangling => return Err(err("dangling text".to_string())),
        }
    }

    tracing::debug!(
        groups = declarations.groups.len(),
        customs = declarations.customs.len(),
        "parsed {}",
        file
    );
    Ok(declarations)
}

/// Interpret the text between `[` and `]`.
fn open_block(declarations: &Declarations, inner: &str) -> std::result::Result<ParseState, String> {
    match inner.split_once(':') {
        None => {
            if inner.is_empty() {
                return Err("empty group name".to_string());
            }
            if declarations.groups.contains_key(inner) {
                return Err(format!("the group {} had already been defined", inner));
            }
            Ok(ParseState::Group(inner.to_string()))
        }
        Some((keyword, value)) => match keyword.trim() {
            "custom" => Ok(ParseState::Custom(
                value
                    .split('|')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            other => Err(format!("unrecognized keyword {}", other)),
        },
    }
}
