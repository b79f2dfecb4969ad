// SPDX-License-Identifier: Apache-2.0

//! Derive for nicfg internal use
//!
//! [JsonDisplay]: Implement `std::fmt::Display` trait using JSON output and
//! fallback to Debug display.
//!
//! [JsonDisplayHideSecrets]: Same as [JsonDisplay] but display a clone with
//! `hide_secrets()` invoked.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(JsonDisplay)]
pub fn derive_json_display(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;
    let body = json_display_body(quote::quote! { self });

    TokenStream::from(quote::quote! {
        impl std::fmt::Display for #class_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #body
            }
        }
    })
}

#[proc_macro_derive(JsonDisplayHideSecrets)]
pub fn derive_json_display_hide_secrets(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let class_name = &input.ident;
    let body = json_display_body(quote::quote! { self_clone });

    TokenStream::from(quote::quote! {
        impl std::fmt::Display for #class_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut self_clone = self.clone();
                self_clone.hide_secrets();
                #body
            }
        }
    })
}

// Shared body: JSON string with the surrounding quotes of plain strings
// stripped, Debug output when serialization fails.
fn json_display_body(
    target: proc_macro2::TokenStream,
) -> proc_macro2::TokenStream {
    quote::quote! {
        match serde_json::to_string(&#target) {
            Ok(s) => {
                if s.matches('"').count() == 2
                    && let Some(s) =
                        s.strip_prefix('"').and_then(|s| s.strip_suffix('"'))
                {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{}", s)
                }
            }
            Err(e) => {
                log::error!(
                    "BUG: Failed to convert {:?} into JSON: {e}", #target
                );
                write!(f, "{:?}", #target)
            }
        }
    }
}
