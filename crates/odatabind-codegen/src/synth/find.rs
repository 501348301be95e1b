use super::{persist::key_args, snippets, EntityModel};
use crate::{Anchor, Body, MethodDecl};

/// `findAll<Plural>()`: every remote entity, mapped into a fresh instance.
pub(super) fn find_all(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();

    MethodDecl::new(model.names.find_all())
        .prefix("public static")
        .returns(format!("List<{class}>"))
        .body(list_body(model))
}

/// `find<Entity>Entries(firstResult, maxResults)`. The remote query is not
/// paged; the range parameters only keep the scaffolded views compiling.
pub(super) fn find_entries(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();

    MethodDecl::new(model.names.find_entries())
        .prefix("public static")
        .returns(format!("List<{class}>"))
        .param("int firstResult")
        .param("int maxResults")
        .body(list_body(model))
}

fn list_body(model: &EntityModel) -> Body {
    let names = &model.names;
    let class = names.class();
    let list = names.list_var();
    let item = names.item_var();
    let instance = names.instance_var();
    let local = names.local_var();
    let temp = format!("tempLocal{class}");

    let mut body = Body::new();

    body.line(
        2,
        format!("OQueryRequest<OEntity> {list} = odc.rooODataConsumer.getEntities(\"{class}\");"),
    )
    .line(2, format!("List<{class}> virtual{class}List = new ArrayList<{class}>();"))
    .line(2, format!("for (OEntity {item} : {list}) {{"))
    .line(3, format!("{class} {instance} = new {class}();"))
    .lines(3, snippets::formatters());

    for field in model.all_fields() {
        body.lines(3, snippets::show_code(field, &instance, &item));
    }

    body.blank()
        .line(
            3,
            format!("OEntityKey ODataKey = OEntityKey.create({});", key_args(model, &format!("{instance}."))),
        )
        .line(3, format!("{instance}.setId(odc.getEncodedRemoteKey(ODataKey.toKeyString()));"))
        .line(3, "String decodedKey = odc.getDecodedRemoteKey(ODataKey.toKeyString());")
        .line(3, format!("{class} {local} = entityManager().find({class}.class, decodedKey);"))
        .line(3, format!("if ({local} == null) {{"))
        .line(4, format!("{class} {temp} = new {class}();"))
        .line(4, format!("{temp}.entityManager = entityManager();"))
        .line(4, format!("{temp}.setId(decodedKey);"))
        .line(4, format!("{temp}.localPersist();"))
        .line(4, format!("{local} = entityManager().find({class}.class, decodedKey);"))
        .line(3, "}");

    relationship_guard(&mut body, 3);

    body.anchor(3, Anchor::Mapping)
        .line(3, format!("virtual{class}List.add({instance});"))
        .line(2, "}")
        .blank()
        .line(2, format!("return virtual{class}List;"));

    body
}

/// `find<Entity>(Id)`: one remote entity, mapped onto the local row.
pub(super) fn find(model: &EntityModel) -> MethodDecl {
    let names = &model.names;
    let class = names.class();
    let remote = names.lower();
    let target = names.virtual_var();

    let mut body = Body::new();

    body.line(2, format!("OEntity {remote} = {}(Id);", names.get_remote()))
        .line(
            2,
            format!("{class} {target} = entityManager().find({class}.class, odc.getDecodedRemoteKey(Id));"),
        )
        .line(2, format!("if ({target} == null)"))
        .line(3, format!("{target} = new {class}();"))
        .lines(2, snippets::formatters());

    for field in model.all_fields() {
        body.lines(2, snippets::show_code(field, &target, remote));
    }

    relationship_guard(&mut body, 2);

    body.anchor(2, Anchor::Mapping)
        .line(2, format!("return {target};"));

    MethodDecl::new(names.find())
        .prefix("public static")
        .returns(class)
        .param("String Id")
        .body(body)
}

pub(super) fn count(model: &EntityModel) -> MethodDecl {
    let names = &model.names;
    let class = names.class();
    let list = names.list_var();
    let item = names.item_var();

    let mut body = Body::new();
    body.line(
        2,
        format!("OQueryRequest<OEntity> {list} = odc.rooODataConsumer.getEntities(\"{class}\");"),
    )
    .line(2, "int i = 0;")
    .line(2, format!("for (OEntity {item} : {list}) {{"))
    .line(3, "i++;")
    .line(2, "}")
    .line(2, "return i;");

    MethodDecl::new(names.count())
        .prefix("public static")
        .returns("long")
        .body(body)
}

pub(super) fn get_remote(model: &EntityModel) -> MethodDecl {
    let class = model.names.class();

    let mut body = Body::new();
    body.line(2, "OEntityKey ODataKey = OEntityKey.parse(odc.getDecodedRemoteKey(Id));")
        .line(
            2,
            format!("return odc.rooODataConsumer.getEntity(\"{class}\", ODataKey).execute();"),
        );

    MethodDecl::new(model.names.get_remote())
        .prefix("public static")
        .returns("OEntity")
        .param("String Id")
        .body(body)
}

/// The exception guard whose `relationships` anchor collects navigation
/// code. A failing navigation must not lose the entity itself.
fn relationship_guard(body: &mut Body, indent: usize) {
    body.line(indent, "try {")
        .anchor(indent + 1, Anchor::Relationships)
        .line(indent, "} catch (Exception relationshipsException) {")
        .line(indent + 1, "relationshipsException.printStackTrace();")
        .line(indent, "};");
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatabind_core::schema::Field;
    use odatabind_core::EdmType;
    use pretty_assertions::assert_eq;

    fn products() -> EntityModel {
        EntityModel::new(
            "Product",
            vec![Field::new("ProductID", EdmType::Int32, true)],
            vec![Field::new("Name", EdmType::String, false)],
        )
    }

    #[test]
    fn find_maps_by_decoded_key() {
        let method = find(&products());
        assert_eq!(method.signature(), "public static Product findProduct(String Id)");
        assert_eq!(
            method.body.to_string(),
            "\t\tOEntity product = getRemoteProduct(Id);\n\
             \t\tProduct virtualProduct = entityManager().find(Product.class, odc.getDecodedRemoteKey(Id));\n\
             \t\tif (virtualProduct == null)\n\
             \t\t\tvirtualProduct = new Product();\n\
             \t\tDateTimeFormatter DTformatter = ISODateTimeFormat.dateHourMinuteSecondFraction();\n\
             \t\tDateTimeFormatter DTOformatter = ISODateTimeFormat.dateTime();\n\
             \t\tvirtualProduct.setProductID(Integer.parseInt(product.getProperty(\"ProductID\").getValue().toString()));\n\
             \t\tvirtualProduct.setName(product.getProperty(\"Name\").getValue().toString());\n\
             \t\ttry {\n\
             \t\t\t// @anchor relationships\n\
             \t\t} catch (Exception relationshipsException) {\n\
             \t\t\trelationshipsException.printStackTrace();\n\
             \t\t};\n\
             \t\t// @anchor mapping\n\
             \t\treturn virtualProduct;\n"
        );
    }

    #[test]
    fn list_backfills_local_rows() {
        let method = find_all(&products());
        assert_eq!(method.signature(), "public static List<Product> findAllProducts()");

        let body = method.body.to_string();
        assert!(body.contains("\t\tfor (OEntity productItem : productList) {\n"));
        assert!(body.contains(
            "\t\t\tOEntityKey ODataKey = OEntityKey.create(\"ProductID\", productInstance.getProductID());\n"
        ));
        assert!(body.contains("\t\t\t\ttempLocalProduct.localPersist();\n"));
        assert!(body.contains("\t\t\t// @anchor mapping\n\t\t\tvirtualProductList.add(productInstance);\n"));
        assert!(body.ends_with("\t\t}\n\n\t\treturn virtualProductList;\n"));

        let entries = find_entries(&products());
        assert_eq!(
            entries.signature(),
            "public static List<Product> findProductEntries(int firstResult, int maxResults)"
        );
        assert_eq!(entries.body, method.body);
    }

    #[test]
    fn count_and_get_remote() {
        assert_eq!(count(&products()).signature(), "public static long countProducts()");

        let remote = get_remote(&products());
        assert_eq!(remote.signature(), "public static OEntity getRemoteProduct(String Id)");
        assert_eq!(
            remote.body.to_string(),
            "\t\tOEntityKey ODataKey = OEntityKey.parse(odc.getDecodedRemoteKey(Id));\n\
             \t\treturn odc.rooODataConsumer.getEntity(\"Product\", ODataKey).execute();\n"
        );
    }
}
