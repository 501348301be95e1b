use crate::{Body, ClassNames, MethodDecl};

pub const CONTROLLER_IMPORTS: &[&str] = &[
    "org.springframework.web.bind.annotation.PathVariable",
    "org.springframework.ui.Model",
    "java.net.URLEncoder",
    "java.io.UnsupportedEncodingException",
    "org.springframework.web.bind.annotation.RequestMapping",
];

/// The `show` handler of a scaffolded controller, taking the encoded key as
/// its path variable instead of a numeric id.
pub fn controller_show(names: &ClassNames, date_patterns: bool) -> MethodDecl {
    let class = names.class();
    let mut body = Body::new();

    if date_patterns {
        body.line(2, "addDateTimeFormatPatterns(uiModel);");
    }

    body.line(
        2,
        format!("uiModel.addAttribute(\"{}\", {class}.{}(Id));", class.to_lowercase(), names.find()),
    )
    .line(2, "String encodedKey = null;")
    .line(2, "try {")
    .line(3, "encodedKey = URLEncoder.encode(Id,\"UTF-8\");")
    .line(2, "} catch (UnsupportedEncodingException e) {")
    .line(3, "e.printStackTrace();")
    .line(2, "}")
    .line(2, "uiModel.addAttribute(\"itemId\", encodedKey);")
    .line(2, format!("return \"{}/show\";", names.plural().to_lowercase()));

    MethodDecl::new("show")
        .annotation("@RequestMapping(value = \"/{Id}\", produces = \"text/html\")")
        .returns("String")
        .param("@PathVariable(\"Id\") String Id")
        .param("Model uiModel")
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn show_handler() {
        let method = controller_show(&ClassNames::new("Product"), true);
        assert_eq!(
            method.signature(),
            "public String show(@PathVariable(\"Id\") String Id, Model uiModel)"
        );
        assert_eq!(
            method.body.to_string(),
            "\t\taddDateTimeFormatPatterns(uiModel);\n\
             \t\tuiModel.addAttribute(\"product\", Product.findProduct(Id));\n\
             \t\tString encodedKey = null;\n\
             \t\ttry {\n\
             \t\t\tencodedKey = URLEncoder.encode(Id,\"UTF-8\");\n\
             \t\t} catch (UnsupportedEncodingException e) {\n\
             \t\t\te.printStackTrace();\n\
             \t\t}\n\
             \t\tuiModel.addAttribute(\"itemId\", encodedKey);\n\
             \t\treturn \"products/show\";\n"
        );
    }

    #[test]
    fn date_patterns_are_optional() {
        let method = controller_show(&ClassNames::new("Product"), false);
        assert!(!method.body.to_string().contains("addDateTimeFormatPatterns"));
    }
}
