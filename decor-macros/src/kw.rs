syn::custom_keyword!(name);
