// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellLine {
    Var {
        key: String,
        value: String,
        /// Original text, dropped once the value changes.
        raw: Option<String>,
    },
    Other(String),
}

/// Shell variable file like `/etc/sysconfig/network/ifcfg-eth0`.
///
/// Comments, blank lines and untouched assignments are kept verbatim when
/// writing back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ShellVarFile {
    lines: Vec<ShellLine>,
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw: &str) -> String {
    let mut ret = String::new();
    let mut chars = raw.trim_start().chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                for c in chars.by_ref() {
                    if c == '\'' {
                        break;
                    }
                    ret.push(c);
                }
            }
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '"' => break,
                        '\\' => match chars.peek() {
                            Some(n @ ('"' | '\\' | '$' | '`')) => {
                                ret.push(*n);
                                chars.next();
                            }
                            _ => ret.push(c),
                        },
                        _ => ret.push(c),
                    }
                }
            }
            '\\' => {
                if let Some(n) = chars.next() {
                    ret.push(n);
                }
            }
            '#' if ret.is_empty() => break,
            c if c.is_whitespace() => break,
            _ => ret.push(c),
        }
    }
    ret
}

fn quote_value(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

impl ShellVarFile {
    pub(crate) fn parse(content: &str) -> Self {
        let mut lines = Vec::new();
        for line in content.lines() {
            let trimmed = line.trim_start();
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            match trimmed.split_once('=') {
                Some((key, value))
                    if !trimmed.starts_with('#') && is_valid_key(key) =>
                {
                    lines.push(ShellLine::Var {
                        key: key.to_string(),
                        value: parse_value(value),
                        raw: Some(line.to_string()),
                    })
                }
                _ => lines.push(ShellLine::Other(line.to_string())),
            }
        }
        Self { lines }
    }

    /// Value of `key`, the last assignment wins.
    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().rev().find_map(|l| match l {
            ShellLine::Var { key: k, value, .. } if k == key => {
                Some(value.as_str())
            }
            _ => None,
        })
    }

    /// Non-empty value of `key`.
    pub(crate) fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub(crate) fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_non_empty(key).map(|v| {
            matches!(v.to_lowercase().as_str(), "yes" | "true" | "on" | "1")
        })
    }

    pub(crate) fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_non_empty(key).and_then(|v| match v.parse() {
            Ok(i) => Some(i),
            Err(e) => {
                log::warn!("Ignoring invalid number {key}={v}: {e}");
                None
            }
        })
    }

    /// Assign `key`. The first assignment is updated in place, following
    /// ones are removed.
    pub(crate) fn set(&mut self, key: &str, value: &str) {
        let mut done = false;
        self.lines.retain_mut(|l| match l {
            ShellLine::Var {
                key: k,
                value: v,
                raw,
            } if k == key => {
                if done {
                    false
                } else {
                    if v != value {
                        *v = value.to_string();
                        *raw = None;
                    }
                    done = true;
                    true
                }
            }
            _ => true,
        });
        if !done {
            self.lines.push(ShellLine::Var {
                key: key.to_string(),
                value: value.to_string(),
                raw: None,
            });
        }
    }

    /// Assign `key` for `Some`, remove it for `None`.
    pub(crate) fn set_opt(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => self.set(key, v),
            None => self.remove(key),
        }
    }

    pub(crate) fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "yes" } else { "no" });
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.lines.retain(
            |l| !matches!(l, ShellLine::Var { key: k, .. } if k == key),
        );
    }

    /// Remove all keys starting with `prefix`.
    pub(crate) fn remove_prefixed(&mut self, prefix: &str) {
        self.lines.retain(|l| match l {
            ShellLine::Var { key, .. } => !key.starts_with(prefix),
            ShellLine::Other(_) => true,
        });
    }

    /// Distinct keys in file order.
    pub(crate) fn keys(&self) -> Vec<&str> {
        let mut ret: Vec<&str> = Vec::new();
        for line in self.lines.iter() {
            if let ShellLine::Var { key, .. } = line
                && !ret.contains(&key.as_str())
            {
                ret.push(key.as_str());
            }
        }
        ret
    }

    /// Suffixes of keys named `<prefix><suffix>` in file order.
    pub(crate) fn suffixes(&self, prefix: &str) -> Vec<&str> {
        self.keys()
            .into_iter()
            .filter_map(|k| k.strip_prefix(prefix))
            .collect()
    }

    pub(crate) fn has_prefix(&self, prefix: &str) -> bool {
        self.keys().iter().any(|k| k.starts_with(prefix))
    }
}

impl std::fmt::Display for ShellVarFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            match line {
                ShellLine::Var {
                    raw: Some(raw), ..
                } => writeln!(f, "{raw}")?,
                ShellLine::Var { key, value, .. } => {
                    writeln!(f, "{key}={}", quote_value(value))?
                }
                ShellLine::Other(s) => writeln!(f, "{s}")?,
            }
        }
        Ok(())
    }
}
