use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, LitStr};

const LEVEL_MACROS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Generates crate-local `error!`, `warn!`, `info!`, `debug!` and `trace!`
/// macros that log under the given target, plus a `DEFAULT_TARGET_NAME`
/// static to register that target with `set_up_logging`.
///
/// The calling crate must depend on `action_output_logging` under that name.
#[proc_macro]
pub fn with_target(input: TokenStream) -> TokenStream {
    let target_lit = parse_macro_input!(input as LitStr);

    let definitions: TokenStream2 = LEVEL_MACROS
        .iter()
        .map(|level| {
            let level_macro = format_ident!("{}", level);
            let local_macro = format_ident!("log_{}", level);
            quote! {
                macro_rules! #local_macro {
                    (target: $target:expr, $($arg:tt)+) => {
                        action_output_logging::__internal_redirects::#level_macro!(target: $target, $($arg)+)
                    };
                    ($($arg:tt)+) => {
                        action_output_logging::__internal_redirects::#level_macro!(target: #target_lit, $($arg)+)
                    };
                }
                pub(crate) use #local_macro as #level_macro;
            }
        })
        .collect();

    let exports = LEVEL_MACROS.iter().map(|level| format_ident!("{}", level));

    quote! {
        #[doc(hidden)]
        mod __internal_logging_macros {
            #definitions
        }

        pub(crate) use __internal_logging_macros::{#(#exports),*};

        pub static DEFAULT_TARGET_NAME: &str = #target_lit;
    }
    .into()
}
