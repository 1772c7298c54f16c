//! The callmock procedural macros.

#![forbid(unsafe_code)]

mod mock;

extern crate proc_macro;

///
/// Generate a mock struct implementing the annotated trait.
/// Re-exported by `callmock`, it is documented there.
///
/// # Attributes
/// * `name = Ident`: name of the generated struct, defaults to the trait name followed by `Mock`.
/// * `prefix = path`: path to the `callmock` crate, defaults to `::callmock`.
///
#[proc_macro_attribute]
pub fn mock(
    attr: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attr = syn::parse_macro_input!(attr as mock::Attr);
    let item_trait = syn::parse_macro_input!(input as syn::ItemTrait);

    let output = match mock::generate(attr, item_trait) {
        Ok(stream) => stream,
        Err(err) => err.to_compile_error(),
    };

    proc_macro::TokenStream::from(output)
}
