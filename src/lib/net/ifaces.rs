// SPDX-License-Identifier: Apache-2.0

use serde::{
    Deserialize, Deserializer, Serialize, Serializer, ser::SerializeSeq,
};

use crate::{
    CollectionDiff, ErrorKind, Interface, InterfaceId, InterfaceType,
    JsonDisplay, NicfgError,
};

/// Ordered list of [Interface] keyed by name.
///
/// Every interface gets an [InterfaceId] when pushed. Routes refer to
/// interfaces by this ID, hence renaming an interface here is observed by
/// every route pointing to it.
#[derive(Clone, Debug, Default, Eq, JsonDisplay)]
#[non_exhaustive]
pub struct Interfaces {
    ifaces: Vec<Interface>,
    next_id: u32,
}

impl PartialEq for Interfaces {
    fn eq(&self, other: &Self) -> bool {
        self.ifaces == other.ifaces
    }
}

impl<'de> Deserialize<'de> for Interfaces {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut ret = Self::default();
        for iface in <Vec<Interface> as Deserialize>::deserialize(deserializer)?
        {
            if ret.by_id(iface.id).is_some() {
                ret.push(iface);
            } else {
                ret.next_id = ret.next_id.max(iface.id.0 + 1);
                ret.ifaces.push(iface);
            }
        }
        Ok(ret)
    }
}

impl Serialize for Interfaces {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.ifaces.len()))?;
        for iface in self.ifaces.iter() {
            seq.serialize_element(iface)?;
        }
        seq.end()
    }
}

impl Interfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ifaces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ifaces.len()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.ifaces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Interface> {
        self.ifaces.iter_mut()
    }

    /// Append specified [Interface] and return its ID.
    /// When an interface with the same name exists, it is replaced in place
    /// and keeps its ID.
    pub fn push(&mut self, mut iface: Interface) -> InterfaceId {
        if let Some(existing) =
            self.ifaces.iter_mut().find(|i| i.name == iface.name)
        {
            iface.id = existing.id;
            *existing = iface;
            existing.id
        } else {
            iface.id = InterfaceId(self.next_id);
            self.next_id += 1;
            let id = iface.id;
            self.ifaces.push(iface);
            id
        }
    }

    pub fn by_id(&self, id: InterfaceId) -> Option<&Interface> {
        self.ifaces.iter().find(|i| i.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Interface> {
        self.ifaces.iter().find(|i| i.name == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.ifaces.iter_mut().find(|i| i.name == name)
    }

    pub fn by_type<'a>(
        &'a self,
        iface_type: &'a InterfaceType,
    ) -> impl Iterator<Item = &'a Interface> {
        self.ifaces.iter().filter(move |i| &i.iface_type == iface_type)
    }

    pub fn physical(&self) -> impl Iterator<Item = &Interface> {
        self.ifaces.iter().filter(|i| i.is_physical())
    }

    pub fn by_busid(&self, busid: &str) -> Option<&Interface> {
        self.ifaces.iter().find(|i| i.busid() == Some(busid))
    }

    pub fn known_names(&self) -> Vec<&str> {
        self.ifaces.iter().map(|i| i.name.as_str()).collect()
    }

    /// First unused name in the form of `<prefix><number>`.
    pub fn free_name(&self, prefix: &str) -> String {
        let mut index: u32 = 0;
        loop {
            let name = format!("{prefix}{index}");
            if self.by_name(&name).is_none() {
                return name;
            }
            index += 1;
        }
    }

    /// Return the ID of the interface named `name`, creating a not present
    /// interface of type `fallback_type` when missing.
    pub(crate) fn find_or_create(
        &mut self,
        name: &str,
        fallback_type: InterfaceType,
    ) -> InterfaceId {
        match self.by_name(name) {
            Some(iface) => iface.id,
            None => {
                log::debug!(
                    "Creating not present interface {name} with type \
                     {fallback_type}"
                );
                self.push(Interface::new(name, fallback_type))
            }
        }
    }

    pub fn rename(
        &mut self,
        old_name: &str,
        new_name: &str,
    ) -> Result<InterfaceId, NicfgError> {
        if old_name != new_name && self.by_name(new_name).is_some() {
            return Err(NicfgError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Cannot rename interface {old_name} to {new_name}: \
                     name already in use"
                ),
            ));
        }
        let iface = self.by_name_mut(old_name).ok_or_else(|| {
            NicfgError::new(
                ErrorKind::NotFound,
                format!("Interface {old_name} not found"),
            )
        })?;
        if iface.old_name.is_none() {
            iface.old_name = Some(old_name.to_string());
        }
        iface.name = new_name.to_string();
        Ok(iface.id)
    }

    pub fn remove(&mut self, name: &str) -> Option<Interface> {
        let pos = self.ifaces.iter().position(|i| i.name == name)?;
        Some(self.ifaces.remove(pos))
    }

    /// Difference of `self`(new) against `old`. IDs are not compared.
    pub fn diff(&self, old: &Self) -> CollectionDiff {
        CollectionDiff::compute(
            self.ifaces.iter().map(|i| (i.name.as_str(), i)),
            old.ifaces.iter().map(|i| (i.name.as_str(), i)),
            |a, b| {
                a.iface_type == b.iface_type
                    && a.hardware == b.hardware
                    && a.present == b.present
            },
        )
    }
}
