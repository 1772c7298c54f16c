use quote::{format_ident, quote};
use syn::spanned::Spanned;

mod attr;
mod method;

pub use attr::Attr;
use method::{MethodKind, MockMethod};

pub fn generate(attr: Attr, item_trait: syn::ItemTrait) -> syn::Result<proc_macro2::TokenStream> {
    if !item_trait.generics.params.is_empty() {
        return Err(syn::Error::new(
            item_trait.generics.span(),
            "Generic traits are not supported",
        ));
    }

    let mut methods: Vec<MockMethod> = vec![];
    for item in &item_trait.items {
        match item {
            syn::TraitItem::Fn(trait_fn) => match method::analyze(trait_fn)? {
                MethodKind::Mocked(method) => methods.push(method),
                MethodKind::KeepDefault => {}
            },
            syn::TraitItem::Type(item_type) => {
                return Err(syn::Error::new(
                    item_type.span(),
                    "Associated types are not supported",
                ))
            }
            syn::TraitItem::Const(item_const) if item_const.default.is_none() => {
                return Err(syn::Error::new(
                    item_const.span(),
                    "Associated consts need a default value",
                ))
            }
            _ => {}
        }
    }

    let prefix = &attr.prefix;
    let vis = &item_trait.vis;
    let trait_ident = &item_trait.ident;
    let mock_ident = attr
        .name
        .clone()
        .unwrap_or_else(|| format_ident!("{}Mock", trait_ident));
    let doc = format!("Mock implementation of [`{trait_ident}`].");

    let fields = methods.iter().map(|method| {
        let ident = &method.ident;
        let doc = format!("Records calls to `{trait_ident}::{ident}`.");
        let recorded = method.args.iter().map(|arg| &arg.recorded_ty);
        let output = &method.output;
        quote! {
            #[doc = #doc]
            pub #ident: #prefix::MockFunction<(#(#recorded,)*), #output>
        }
    });

    let field_inits = methods.iter().map(|method| {
        let ident = &method.ident;
        let name = format!("{trait_ident}::{ident}");
        let recorded = method.args.iter().map(|arg| &arg.recorded_ty);
        let output = &method.output;
        quote! {
            #ident: #prefix::mock_function!(fn(#(#recorded),*) -> #output).named(#name)
        }
    });

    let field_idents = methods.iter().map(|method| &method.ident);

    let impl_fns = methods.iter().map(|method| {
        let ident = &method.ident;
        let sig = &method.sig;
        let captures = method.args.iter().map(|arg| &arg.capture);
        quote! {
            #sig {
                self.#ident.call((#(#captures,)*))
            }
        }
    });

    Ok(quote! {
        #item_trait

        #[doc = #doc]
        #vis struct #mock_ident {
            #(#fields,)*
        }

        impl #mock_ident {
            /// Create a mock with nothing recorded and no answers configured.
            pub fn new() -> Self {
                Self {
                    #(#field_inits,)*
                }
            }

            /// Forget the recorded calls and configured answers of every method.
            pub fn clear_all(&self) {
                #(self.#field_idents.clear();)*
            }
        }

        impl ::core::default::Default for #mock_ident {
            fn default() -> Self {
                Self::new()
            }
        }

        impl #trait_ident for #mock_ident {
            #(#impl_fns)*
        }
    })
}
