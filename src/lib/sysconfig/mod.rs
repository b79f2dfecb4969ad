// SPDX-License-Identifier: Apache-2.0

mod base;
mod handlers;
mod ifcfg;
mod netconfig;
mod reader;
mod route_file;
mod s390;
mod shell_file;
mod wireless;
mod writer;

#[cfg(test)]
mod unit_tests;

pub use self::route_file::RouteRecord;

use self::handlers::{SysconfigHandler, sysconfig_registry};
use crate::dispatch::TypeRegistry;

/// Backend of `ifcfg-<name>`, `routes` and `ifroute-<name>` files under
/// `/etc/sysconfig/network`.
pub struct SysconfigBackend {
    registry: TypeRegistry<dyn SysconfigHandler>,
}

impl SysconfigBackend {
    pub fn new() -> Self {
        Self {
            registry: sysconfig_registry(),
        }
    }
}

impl Default for SysconfigBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SysconfigBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysconfigBackend").finish_non_exhaustive()
    }
}
