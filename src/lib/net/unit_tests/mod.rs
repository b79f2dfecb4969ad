// SPDX-License-Identifier: Apache-2.0

mod conns;
mod route;
mod value;
