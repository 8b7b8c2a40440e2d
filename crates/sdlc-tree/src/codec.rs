//! JSON tree codec
//!
//! Wire shape: `{name: string, level?: int, ai_percentage?: number, children?: [...]}`.
//!
//! Both directions walk the tree with explicit stacks, so any tree the store
//! can hold survives `load(serialize(t))`, however deep. Decoding pulls
//! events from the input and names the path of every rejected value.
//! Unknown keys are ignored and `null` counts as absent.

use crate::error::DecodeError;
use crate::node::TreeNode;
use crate::reader::{Event, EventReader};
use serde_json::{Map, Value};

/// Decode a tree from its JSON encoding
///
/// # Errors
/// [`DecodeError`] when the input is not JSON or not tree-shaped.
pub fn load(input: &str) -> Result<TreeNode, DecodeError> {
    let mut reader = EventReader::new(input);
    if reader.require()? != Event::StartObject {
        return Err(DecodeError::NotAnObject { path: String::from("$") });
    }

    let mut current = Partial::new(String::from("$"));
    let mut ancestors: Vec<Partial> = Vec::new();

    loop {
        let event = reader.require()?;

        if current.in_children {
            match event {
                Event::StartObject => {
                    let path = current.child_path();
                    ancestors.push(std::mem::replace(&mut current, Partial::new(path)));
                }
                Event::EndArray => current.in_children = false,
                other => {
                    reader.skip_value(&other)?;
                    return Err(DecodeError::NotAnObject { path: current.child_path() });
                }
            }
            continue;
        }

        match event {
            Event::Key(key) => current.field(&key, &mut reader)?,
            Event::EndObject => match ancestors.pop() {
                Some(parent) => {
                    let child = std::mem::replace(&mut current, parent).finish()?;
                    current.children.push(child);
                }
                None => {
                    reader.finish()?;
                    return current.finish();
                }
            },
            _ => return Err(reader.unexpected("an object key")),
        }
    }
}

/// Encode a tree as compact JSON
#[must_use]
pub fn serialize(root: &TreeNode) -> String {
    Writer::new(false).write(root)
}

/// Encode a tree as indented JSON
#[must_use]
pub fn serialize_pretty(root: &TreeNode) -> String {
    Writer::new(true).write(root)
}

/// A node whose closing brace has not been read yet
struct Partial {
    path: String,
    name: Option<String>,
    level: Option<u32>,
    ai_percentage: Option<f64>,
    children: Vec<TreeNode>,
    in_children: bool,
}

impl Partial {
    fn new(path: String) -> Self {
        Self {
            path,
            name: None,
            level: None,
            ai_percentage: None,
            children: Vec::new(),
            in_children: false,
        }
    }

    fn child_path(&self) -> String {
        format!("{}.children[{}]", self.path, self.children.len())
    }

    fn field(&mut self, key: &str, reader: &mut EventReader<'_>) -> Result<(), DecodeError> {
        let event = reader.require()?;
        match key {
            "children" => match event {
                Event::StartArray => {
                    self.children.clear();
                    self.in_children = true;
                }
                Event::Scalar(Value::Null) => self.children.clear(),
                other => {
                    reader.skip_value(&other)?;
                    return Err(DecodeError::InvalidChildren {
                        path: format!("{}.children", self.path),
                    });
                }
            },
            "name" => {
                self.name = match scalar(event, reader)? {
                    Value::String(name) => Some(name),
                    Value::Null => None,
                    _ => return Err(DecodeError::InvalidName { path: self.path.clone() }),
                };
            }
            "level" => self.level = decode_level(scalar(event, reader)?, &self.path)?,
            "ai_percentage" => {
                self.ai_percentage = decode_ai_percentage(scalar(event, reader)?, &self.path)?;
            }
            _ => reader.skip_value(&event)?,
        }
        Ok(())
    }

    fn finish(self) -> Result<TreeNode, DecodeError> {
        let Some(name) = self.name else {
            return Err(DecodeError::MissingName { path: self.path });
        };
        Ok(TreeNode::new(name)
            .with_level_opt(self.level)
            .with_ai_percentage_opt(self.ai_percentage)
            .with_children(self.children))
    }
}

/// Value of a field expected to be a scalar; containers are skipped and
/// stand in as empty
fn scalar(event: Event, reader: &mut EventReader<'_>) -> Result<Value, DecodeError> {
    match event {
        Event::Scalar(value) => Ok(value),
        Event::StartObject => {
            reader.skip_value(&event)?;
            Ok(Value::Object(Map::new()))
        }
        Event::StartArray => {
            reader.skip_value(&event)?;
            Ok(Value::Array(Vec::new()))
        }
        _ => Err(reader.unexpected("a value")),
    }
}

fn decode_level(value: Value, path: &str) -> Result<Option<u32>, DecodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|l| u32::try_from(l).ok())
            .map(Some)
            .ok_or_else(|| DecodeError::InvalidLevel {
                path: format!("{path}.level"),
                found: n.to_string(),
            }),
        other => Err(DecodeError::InvalidLevel {
            path: format!("{path}.level"),
            found: other.to_string(),
        }),
    }
}

fn decode_ai_percentage(value: Value, path: &str) -> Result<Option<f64>, DecodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .filter(|p| (0.0..=100.0).contains(p))
            .map(Some)
            .ok_or_else(|| DecodeError::InvalidAiPercentage {
                path: format!("{path}.ai_percentage"),
                found: n.to_string(),
            }),
        other => Err(DecodeError::InvalidAiPercentage {
            path: format!("{path}.ai_percentage"),
            found: other.to_string(),
        }),
    }
}

enum Step<'a> {
    Node(&'a TreeNode),
    Comma,
    CloseChildren,
}

/// Iterative encoder; layout matches `serde_json`'s compact and pretty output
struct Writer {
    out: String,
    pretty: bool,
    indent: usize,
}

impl Writer {
    fn new(pretty: bool) -> Self {
        Self {
            out: String::new(),
            pretty,
            indent: 0,
        }
    }

    fn write(mut self, root: &TreeNode) -> String {
        let mut steps = vec![Step::Node(root)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Node(node) => {
                    if !std::ptr::eq(node, root) {
                        self.newline();
                    }
                    self.open('{');
                    self.field("name", &Value::from(node.name()), true);
                    if let Some(level) = node.level() {
                        self.field("level", &Value::from(level), false);
                    }
                    if let Some(pct) = node.ai_percentage() {
                        self.field("ai_percentage", &Value::from(pct), false);
                    }
                    if node.is_leaf() {
                        self.close('}');
                        continue;
                    }
                    self.key("children", false);
                    self.open('[');
                    steps.push(Step::CloseChildren);
                    for (index, child) in node.children().iter().enumerate().rev() {
                        steps.push(Step::Node(child));
                        if index > 0 {
                            steps.push(Step::Comma);
                        }
                    }
                }
                Step::Comma => self.out.push(','),
                Step::CloseChildren => {
                    self.close(']');
                    self.close('}');
                }
            }
        }
        self.out
    }

    fn open(&mut self, bracket: char) {
        self.out.push(bracket);
        self.indent += 1;
    }

    fn close(&mut self, bracket: char) {
        self.indent -= 1;
        self.newline();
        self.out.push(bracket);
    }

    fn newline(&mut self) {
        if self.pretty {
            self.out.push('\n');
            for _ in 0..self.indent {
                self.out.push_str("  ");
            }
        }
    }

    fn key(&mut self, key: &str, first: bool) {
        if !first {
            self.out.push(',');
        }
        self.newline();
        self.out.push('"');
        self.out.push_str(key);
        self.out.push_str(if self.pretty { "\": " } else { "\":" });
    }

    fn field(&mut self, key: &str, value: &Value, first: bool) {
        self.key(key, first);
        self.out.push_str(&value.to_string());
    }
}
