// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::InterfaceType;

/// Map from device type to the handler of one backend. Each backend owns
/// its registry.
pub(crate) struct TypeRegistry<H: ?Sized> {
    handlers: HashMap<InterfaceType, Box<H>>,
}

impl<H: ?Sized> Default for TypeRegistry<H> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<H: ?Sized> TypeRegistry<H> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(
        &mut self,
        iface_type: InterfaceType,
        handler: Box<H>,
    ) {
        self.handlers.insert(iface_type, handler);
    }

    /// `None` when no handler registered for specified type.
    pub(crate) fn lookup(&self, iface_type: &InterfaceType) -> Option<&H> {
        let ret = self.handlers.get(iface_type).map(Box::as_ref);
        if ret.is_none() {
            log::debug!(
                "No handler registered for interface type {iface_type}"
            );
        }
        ret
    }

    pub(crate) fn contains(&self, iface_type: &InterfaceType) -> bool {
        self.handlers.contains_key(iface_type)
    }
}
