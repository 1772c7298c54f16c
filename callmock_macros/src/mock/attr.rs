/// Parsed `mock` attribute
pub struct Attr {
    /// callmock's prefix, e.g. `::callmock`
    pub prefix: syn::Path,
    /// Name of the generated struct
    pub name: Option<syn::Ident>,
}

impl syn::parse::Parse for Attr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut prefix: Option<syn::Path> = None;
        let mut name: Option<syn::Ident> = None;

        while !input.is_empty() {
            let keyword: syn::Ident = input.parse()?;
            let _: syn::token::Eq = input.parse()?;
            match keyword.to_string().as_str() {
                "prefix" => {
                    prefix = Some(input.parse()?);
                }
                "name" => {
                    name = Some(input.parse()?);
                }
                _ => return Err(syn::Error::new(keyword.span(), "Unrecognized keyword")),
            };

            if input.peek(syn::token::Comma) {
                let _: syn::token::Comma = input.parse()?;
            } else {
                break;
            }
        }

        if !input.is_empty() {
            return Err(input.error("Expected `,`"));
        }

        Ok(Self {
            prefix: prefix.unwrap_or_else(|| syn::parse_quote! { ::callmock }),
            name,
        })
    }
}
