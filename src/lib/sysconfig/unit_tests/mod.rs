// SPDX-License-Identifier: Apache-2.0

mod ifcfg;
mod route_file;
mod shell_file;
