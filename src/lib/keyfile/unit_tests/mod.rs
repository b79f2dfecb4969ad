// SPDX-License-Identifier: Apache-2.0

mod backend;
mod ip;
mod key_file;
