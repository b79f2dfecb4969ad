// SPDX-License-Identifier: Apache-2.0

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyLine {
    Entry { key: String, value: String },
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KeySection {
    name: String,
    lines: Vec<KeyLine>,
}

impl KeySection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            lines: Vec::new(),
        }
    }
}

/// Sectioned `key=value` file like
/// `/etc/NetworkManager/system-connections/eth0.nmconnection`.
///
/// Sections and keys unknown to the caller are kept in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct KeyFile {
    /// Lines before the first section.
    header: Vec<String>,
    sections: Vec<KeySection>,
}

impl KeyFile {
    pub(crate) fn parse(content: &str) -> Self {
        let mut ret = Self::default();
        for line in content.lines() {
            let trimmed = line.trim();
            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
            {
                ret.sections.push(KeySection::new(name.trim()));
                continue;
            }
            let Some(section) = ret.sections.last_mut() else {
                ret.header.push(line.to_string());
                continue;
            };
            match trimmed.split_once('=') {
                Some((key, value))
                    if !trimmed.starts_with('#')
                        && !trimmed.starts_with(';') =>
                {
                    section.lines.push(KeyLine::Entry {
                        key: key.trim().to_string(),
                        value: value.trim().to_string(),
                    })
                }
                _ => section.lines.push(KeyLine::Other(line.to_string())),
            }
        }
        ret
    }

    fn section(&self, name: &str) -> Option<&KeySection> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut_or_create(&mut self, name: &str) -> &mut KeySection {
        let pos = match self.sections.iter().position(|s| s.name == name) {
            Some(pos) => pos,
            None => {
                self.sections.push(KeySection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[pos]
    }

    /// Append empty section when missing.
    pub(crate) fn ensure_section(&mut self, name: &str) {
        self.section_mut_or_create(name);
    }

    #[cfg(test)]
    pub(crate) fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub(crate) fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.lines.iter().rev().find_map(|l| match l {
            KeyLine::Entry { key: k, value } if k == key => {
                Some(value.as_str())
            }
            _ => None,
        })
    }

    pub(crate) fn get_non_empty(
        &self,
        section: &str,
        key: &str,
    ) -> Option<&str> {
        self.get(section, key).filter(|v| !v.is_empty())
    }

    pub(crate) fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        self.get_non_empty(section, key).map(|v| {
            matches!(v.to_lowercase().as_str(), "true" | "yes" | "1")
        })
    }

    pub(crate) fn get_u32(&self, section: &str, key: &str) -> Option<u32> {
        self.get_non_empty(section, key).and_then(|v| match v.parse() {
            Ok(i) => Some(i),
            Err(e) => {
                log::warn!(
                    "Ignoring invalid number {section}.{key}={v}: {e}"
                );
                None
            }
        })
    }

    /// Semicolon separated list, empty items dropped.
    pub(crate) fn get_list(&self, section: &str, key: &str) -> Vec<&str> {
        self.get(section, key)
            .map(|v| {
                v.split(';')
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Distinct keys of `section` in file order.
    pub(crate) fn keys(&self, section: &str) -> Vec<&str> {
        let mut ret: Vec<&str> = Vec::new();
        if let Some(s) = self.section(section) {
            for line in s.lines.iter() {
                if let KeyLine::Entry { key, .. } = line
                    && !ret.contains(&key.as_str())
                {
                    ret.push(key.as_str());
                }
            }
        }
        ret
    }

    /// Assign `key`, creating the section when missing.
    pub(crate) fn set(&mut self, section: &str, key: &str, value: &str) {
        let section = self.section_mut_or_create(section);
        let mut done = false;
        section.lines.retain_mut(|l| match l {
            KeyLine::Entry { key: k, value: v } if k == key => {
                if done {
                    false
                } else {
                    *v = value.to_string();
                    done = true;
                    true
                }
            }
            _ => true,
        });
        if !done {
            // Keep trailing blank lines after the last entry
            let pos = section
                .lines
                .iter()
                .rposition(|l| {
                    !matches!(l, KeyLine::Other(s) if s.trim().is_empty())
                })
                .map(|p| p + 1)
                .unwrap_or(0);
            section.lines.insert(
                pos,
                KeyLine::Entry {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            );
        }
    }

    pub(crate) fn set_opt(
        &mut self,
        section: &str,
        key: &str,
        value: Option<&str>,
    ) {
        match value {
            Some(v) => self.set(section, key, v),
            None => self.remove(section, key),
        }
    }

    pub(crate) fn set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.set(section, key, if value { "true" } else { "false" });
    }

    /// Store `items` as `a;b;`, remove the key for empty list.
    pub(crate) fn set_list(
        &mut self,
        section: &str,
        key: &str,
        items: &[String],
    ) {
        if items.is_empty() {
            self.remove(section, key);
        } else {
            let mut value = items.join(";");
            value.push(';');
            self.set(section, key, &value);
        }
    }

    pub(crate) fn remove(&mut self, section: &str, key: &str) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.name == section) {
            s.lines.retain(
                |l| !matches!(l, KeyLine::Entry { key: k, .. } if k == key),
            );
        }
    }

    /// Remove keys of `section` matching `filter`.
    pub(crate) fn remove_matching<F>(&mut self, section: &str, filter: F)
    where
        F: Fn(&str) -> bool,
    {
        if let Some(s) = self.sections.iter_mut().find(|s| s.name == section) {
            s.lines.retain(|l| match l {
                KeyLine::Entry { key, .. } => !filter(key.as_str()),
                KeyLine::Other(_) => true,
            });
        }
    }

    pub(crate) fn remove_section(&mut self, section: &str) {
        self.sections.retain(|s| s.name != section);
    }
}

impl std::fmt::Display for KeyFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.header.iter() {
            writeln!(f, "{line}")?;
        }
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0
                && !matches!(
                    self.sections[index - 1].lines.last(),
                    Some(KeyLine::Other(s)) if s.trim().is_empty()
                )
            {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for line in section.lines.iter() {
                match line {
                    KeyLine::Entry { key, value } => {
                        writeln!(f, "{key}={value}")?
                    }
                    KeyLine::Other(s) => writeln!(f, "{s}")?,
                }
            }
        }
        Ok(())
    }
}
