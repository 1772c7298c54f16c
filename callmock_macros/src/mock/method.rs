use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::visit::Visit;

/// What to do with one trait method.
pub enum MethodKind {
    /// Implement by forwarding to a recorder.
    Mocked(MockMethod),
    /// No receiver, but a default body. Left to the trait.
    KeepDefault,
}

pub struct MockMethod {
    /// Name of the method, also used for the recorder field.
    pub ident: syn::Ident,
    /// Signature of the implementation, with arguments renamed.
    pub sig: syn::Signature,
    pub args: Vec<MockArg>,
    pub output: syn::Type,
}

/// One argument of a mocked method.
pub struct MockArg {
    /// Type stored by the recorder.
    pub recorded_ty: syn::Type,
    /// Expression borrowing the recorded form of the argument.
    pub capture: proc_macro2::TokenStream,
}

pub fn analyze(method: &syn::TraitItemFn) -> syn::Result<MethodKind> {
    let sig = &method.sig;

    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.colon_token.is_none() => {}
        Some(receiver) => {
            return Err(syn::Error::new(
                receiver.span(),
                "Only `&self` and `&mut self` receivers can be mocked",
            ))
        }
        None if method.default.is_some() => return Ok(MethodKind::KeepDefault),
        None => {
            return Err(syn::Error::new(
                sig.ident.span(),
                "Methods without a receiver need a default body to be mocked",
            ))
        }
    }

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "Async methods are not supported",
        ));
    }

    for param in &sig.generics.params {
        if !matches!(param, syn::GenericParam::Lifetime(_)) {
            return Err(syn::Error::new(
                param.span(),
                "Generic methods are not supported, mock them with a MockTemplateFunction",
            ));
        }
    }

    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new(
            variadic.span(),
            "Variadic methods are not supported",
        ));
    }

    let output = match &sig.output {
        syn::ReturnType::Default => syn::parse_quote! { () },
        syn::ReturnType::Type(_, ty) => {
            if let Some(span) = Borrowed::find(ty) {
                return Err(syn::Error::new(
                    span,
                    "Only owned return types are supported",
                ));
            }
            ty.as_ref().clone()
        }
    };

    let mut impl_sig = sig.clone();
    let mut args = vec![];

    for (index, input) in impl_sig.inputs.iter_mut().enumerate() {
        let syn::FnArg::Typed(pat_type) = input else {
            continue;
        };

        let ident = format_ident!("arg{}", index);
        *pat_type.pat = syn::parse_quote! { #ident };

        args.push(mock_arg(&ident, &pat_type.ty)?);
    }

    Ok(MethodKind::Mocked(MockMethod {
        ident: sig.ident.clone(),
        sig: impl_sig,
        args,
        output,
    }))
}

fn mock_arg(ident: &syn::Ident, ty: &syn::Type) -> syn::Result<MockArg> {
    let arg = match ty {
        syn::Type::Reference(reference) => match reference.elem.as_ref() {
            syn::Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => MockArg {
                recorded_ty: syn::parse_quote! { ::std::string::String },
                capture: quote! { &<str as ::std::borrow::ToOwned>::to_owned(#ident) },
            },
            syn::Type::Slice(slice) => {
                let elem = &slice.elem;
                MockArg {
                    recorded_ty: syn::parse_quote! { ::std::vec::Vec<#elem> },
                    capture: quote! { &<[#elem] as ::std::borrow::ToOwned>::to_owned(#ident) },
                }
            }
            elem => MockArg {
                recorded_ty: elem.clone(),
                capture: quote! { &*#ident },
            },
        },
        ty => MockArg {
            recorded_ty: ty.clone(),
            capture: quote! { &#ident },
        },
    };

    if let Some(span) = Borrowed::find(&arg.recorded_ty) {
        return Err(syn::Error::new(
            span,
            "Arguments can only borrow at the outermost level, e.g. `&T`, `&str` or `&[T]`",
        ));
    }

    Ok(arg)
}

/// Finds references, lifetimes and `impl Trait` within a type.
#[derive(Default)]
struct Borrowed {
    span: Option<proc_macro2::Span>,
}

impl Borrowed {
    fn find(ty: &syn::Type) -> Option<proc_macro2::Span> {
        let mut borrowed = Self::default();
        borrowed.visit_type(ty);
        borrowed.span
    }
}

impl<'ast> Visit<'ast> for Borrowed {
    fn visit_type_reference(&mut self, reference: &'ast syn::TypeReference) {
        self.span.get_or_insert(reference.span());
    }

    fn visit_type_impl_trait(&mut self, impl_trait: &'ast syn::TypeImplTrait) {
        self.span.get_or_insert(impl_trait.span());
    }

    fn visit_lifetime(&mut self, lifetime: &'ast syn::Lifetime) {
        if lifetime.ident != "static" {
            self.span.get_or_insert(lifetime.span());
        }
    }
}
